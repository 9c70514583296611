//! First-order terms: variables, constants and function applications.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::unify::Substitution;

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// A variable in first-order logic.
///
/// The name is only for humans. Every call to [`Var::new`] allocates a new
/// identity, and two `Var`s are equal only when one is a clone of the other:
/// `Var::new("x") != Var::new("x")`.
#[derive(Clone)]
pub struct Var {
    id: u64,
    name: Arc<str>,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var {
            id: NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name.into()),
        }
    }

    /// A new variable carrying the same name as this one.
    pub fn fresh(&self) -> Self {
        Var {
            id: NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::clone(&self.name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Var {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Creation order.
impl Ord for Var {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An opaque literal constant, compared by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constant {
    name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A function symbol with its arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FnSym {
    pub name: String,
    pub arity: usize,
}

impl FnSym {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FnSym {
            name: name.into(),
            arity,
        }
    }
}

/// A first-order term.
///
/// Equality and hashing are structural, except at variables where they are
/// by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A variable
    Var(Var),
    /// An opaque literal such as `"socrates"`
    Const(Constant),
    /// Function application: f(t1, ..., tn)
    App(FnSym, Vec<Term>),
}

/// Structural containment, used for occurs checks and `x in e` queries.
///
/// `e.contains(x)` holds when `e` is `x` or some sub-expression of `e` is.
/// Symbol names (of functions and predicates) are not searched.
pub trait Contains<T: ?Sized> {
    fn contains(&self, needle: &T) -> bool;
}

impl Term {
    /// Create a constant term.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Const(Constant::new(name))
    }

    /// Create a function application term.
    pub fn app(name: impl Into<String>, args: Vec<Term>) -> Self {
        let arity = args.len();
        Term::App(FnSym::new(name, arity), args)
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(var) => Some(var),
            _ => None,
        }
    }

    /// Check if this term is exactly the variable `var`.
    pub fn is_var(&self, var: &Var) -> bool {
        matches!(self, Term::Var(v) if v == var)
    }

    /// Collect all variables occurring in this term.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        self.collect_variables(&mut set);
        set
    }

    pub(crate) fn collect_variables(&self, set: &mut HashSet<Var>) {
        match self {
            Term::Var(var) => {
                set.insert(var.clone());
            }
            Term::Const(_) => {}
            Term::App(_, args) => {
                for arg in args {
                    arg.collect_variables(set);
                }
            }
        }
    }

    /// Check if this term contains no variables (is ground).
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::App(_, args) => args.iter().all(|arg| arg.is_ground()),
        }
    }

    /// Apply a substitution to this term.
    pub fn apply_subst(&self, subst: &Substitution) -> Term {
        subst.apply_to_term(self)
    }

    /// Apply a substitution and report whether any variable was replaced.
    pub fn substituted(&self, subst: &Substitution) -> (Term, bool) {
        match self {
            Term::Var(var) => match subst.get(var) {
                Some(bound) => (bound.clone(), true),
                None => (self.clone(), false),
            },
            Term::Const(_) => (self.clone(), false),
            Term::App(sym, args) => {
                let mut changed = false;
                let args = args
                    .iter()
                    .map(|arg| {
                        let (arg, arg_changed) = arg.substituted(subst);
                        changed |= arg_changed;
                        arg
                    })
                    .collect();
                (Term::App(sym.clone(), args), changed)
            }
        }
    }

    /// Get the root symbol of this term (function or constant name).
    /// Returns None for variables.
    pub fn root_symbol(&self) -> Option<&str> {
        match self {
            Term::Var(_) => None,
            Term::Const(c) => Some(c.name()),
            Term::App(fn_sym, _) => Some(&fn_sym.name),
        }
    }

    /// Check if a variable occurs in this term.
    pub fn occurs(&self, var: &Var) -> bool {
        match self {
            Term::Var(v) => v == var,
            Term::Const(_) => false,
            Term::App(_, args) => args.iter().any(|arg| arg.occurs(var)),
        }
    }
}

impl Contains<Term> for Term {
    fn contains(&self, needle: &Term) -> bool {
        if self == needle {
            return true;
        }
        match self {
            Term::App(_, args) => args.iter().any(|arg| arg.contains(needle)),
            _ => false,
        }
    }
}

impl Contains<Var> for Term {
    fn contains(&self, needle: &Var) -> bool {
        self.occurs(needle)
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Term::Var(var)
    }
}

impl From<&Var> for Term {
    fn from(var: &Var) -> Self {
        Term::Var(var.clone())
    }
}

impl From<Constant> for Term {
    fn from(constant: Constant) -> Self {
        Term::Const(constant)
    }
}

pub(crate) fn write_args<T: fmt::Display>(f: &mut fmt::Formatter<'_>, args: &[T]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => write!(f, "{}", var),
            Term::Const(c) => write!(f, "{}", c),
            Term::App(fn_sym, args) => {
                write!(f, "{}", fn_sym.name)?;
                if args.is_empty() {
                    Ok(())
                } else {
                    write_args(f, args)
                }
            }
        }
    }
}
