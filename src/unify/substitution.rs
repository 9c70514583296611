//! Substitution: mapping variables to terms, kept fully composed.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{FolError, Result};
use crate::misc::log::targets;
use crate::syntax::{Predicate, Term, Var};

/// A substitution mapping variables to terms.
///
/// A substitution σ = {X₁ → t₁, ..., Xₙ → tₙ} is kept fully composed at all
/// times:
/// - no variable is bound to itself,
/// - no tᵢ contains any Xⱼ, so chains are already resolved and σ is
///   idempotent (which also rules out cycles).
///
/// Every operation that adds bindings returns a new substitution and leaves
/// the receiver untouched, so a substitution that has been handed out never
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: HashMap<Var, Term>,
}

/// What an insertion does with a binding that resolves back onto its own
/// variable, such as `b ↦ a` added to `{a ↦ b}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Renaming {
    /// Drop it: the binding restates an equation already present.
    Collapse,
    /// Report it as circular.
    Reject,
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: HashMap::new(),
        }
    }

    /// Build a substitution from initial bindings.
    ///
    /// Self-bindings are dropped. The remaining bindings are composed in
    /// variable order; a chain that only renames variables onto each other
    /// (`{a ↦ b, b ↦ a}`) collapses to a single binding. Fails if a variable
    /// would be bound to a term strictly containing it, or if the same
    /// variable is given two different values.
    pub fn new(bindings: impl IntoIterator<Item = (Var, Term)>) -> Result<Self> {
        let mut pairs: Vec<(Var, Term)> = bindings
            .into_iter()
            .filter(|(var, term)| !term.is_var(var))
            .collect();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut bindings = HashMap::with_capacity(pairs.len());
        for (var, term) in pairs {
            insert(&mut bindings, var, term, Renaming::Collapse)?;
        }
        Ok(Substitution { bindings })
    }

    /// Create a substitution with a single binding.
    pub fn singleton(var: Var, term: Term) -> Result<Self> {
        Substitution::new([(var, term)])
    }

    /// Return this substitution extended with `var ↦ term`.
    ///
    /// A no-op if `term` is `var`, or resolves to `var` here. Fails if `var`
    /// is already bound to a different value, or if the binding is circular.
    pub fn bind(&self, var: Var, term: Term) -> Result<Self> {
        if term.is_var(&var) {
            return Ok(self.clone());
        }
        let mut bindings = self.bindings.clone();
        insert(&mut bindings, var, term, Renaming::Collapse)?;
        Ok(Substitution { bindings })
    }

    /// Look up the raw binding of a variable.
    pub fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// The value of a variable: its bound term, or the variable itself when
    /// unbound.
    pub fn lookup(&self, var: &Var) -> Term {
        match self.bindings.get(var) {
            Some(term) => term.clone(),
            None => Term::Var(var.clone()),
        }
    }

    /// Total version of [`lookup`](Self::lookup) over terms: a bound variable
    /// is replaced by its value, anything else is returned unchanged. Does
    /// not descend into applications.
    pub fn resolve(&self, term: &Term) -> Term {
        match term {
            Term::Var(var) => self.lookup(var),
            _ => term.clone(),
        }
    }

    /// Combine two substitutions.
    ///
    /// Returns `None` when they bind a variable to different values or when
    /// the union would be circular. Disagreement is an expected outcome
    /// during search, so it is not reported as an error here; use
    /// [`try_merge`](Self::try_merge) to see the reason.
    pub fn merge(&self, other: &Substitution) -> Option<Substitution> {
        match self.try_merge(other) {
            Ok(merged) => Some(merged),
            Err(err) => {
                log::debug!(target: targets::SUBSTITUTION, "Merge of {} and {} failed: {}", self, other, err);
                None
            }
        }
    }

    /// Combine two substitutions, reporting why they can't be combined.
    ///
    /// Bindings for variables only `other` binds are composed in first, then
    /// every variable both bind must agree on its resolved value. Unlike
    /// [`new`](Self::new), a renaming cycle across the two sides
    /// (`{a ↦ b}` with `{b ↦ a}`) is rejected as circular.
    pub fn try_merge(&self, other: &Substitution) -> Result<Substitution> {
        let mut bindings = self.bindings.clone();
        let (shared, fresh): (Vec<_>, Vec<_>) = other
            .sorted_bindings()
            .into_iter()
            .partition(|(var, _)| self.bindings.contains_key(*var));

        for (var, term) in fresh.into_iter().chain(shared) {
            insert(&mut bindings, var.clone(), term.clone(), Renaming::Reject)?;
        }
        Ok(Substitution { bindings })
    }

    /// Apply this substitution to a term.
    pub fn apply_to_term(&self, term: &Term) -> Term {
        apply(&self.bindings, term)
    }

    /// Apply this substitution to a predicate's arguments.
    pub fn apply_to_predicate(&self, predicate: &Predicate) -> Predicate {
        Predicate::new(
            predicate.name.clone(),
            predicate
                .args
                .iter()
                .map(|arg| self.apply_to_term(arg))
                .collect(),
        )
    }

    /// Get the domain of this substitution (variables that are mapped).
    pub fn domain(&self) -> HashSet<&Var> {
        self.bindings.keys().collect()
    }

    /// Check if a variable is in the domain.
    pub fn binds(&self, var: &Var) -> bool {
        self.bindings.contains_key(var)
    }

    /// Iterate over the bindings in this substitution.
    pub fn bindings(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }

    /// Bindings ordered by variable.
    pub fn sorted_bindings(&self) -> Vec<(&Var, &Term)> {
        let mut sorted: Vec<_> = self.bindings.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        sorted
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if this substitution is empty (has no bindings).
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Check if this substitution is a variable renaming.
    /// A renaming maps variables to variables injectively.
    pub fn is_renaming(&self) -> bool {
        let mut target_vars: HashSet<&Var> = HashSet::new();

        for term in self.bindings.values() {
            let to_var = match term {
                Term::Var(v) => v,
                _ => return false,
            };

            if !target_vars.insert(to_var) {
                return false;
            }
        }

        true
    }

    /// Check the fully composed invariant: no self-bindings and no bound
    /// variable inside any value.
    pub fn is_idempotent(&self) -> bool {
        self.bindings.iter().all(|(var, term)| {
            !term.is_var(var) && self.bindings.keys().all(|bound| !term.occurs(bound))
        })
    }

    /// Check whether two substitutions are the same unifier up to the
    /// direction of variable-to-variable bindings.
    ///
    /// Holds when each absorbs the other: σ(θ(v)) = σ(v) and θ(σ(v)) = θ(v)
    /// for every variable either binds. `{x ↦ y}` and `{y ↦ x}` are
    /// equivalent; `{x ↦ a}` and `{x ↦ b}` are not.
    pub fn is_equivalent(&self, other: &Substitution) -> bool {
        self.bindings
            .keys()
            .chain(other.bindings.keys())
            .all(|var| {
                let term = Term::Var(var.clone());
                let mine = self.apply_to_term(&term);
                let theirs = other.apply_to_term(&term);
                self.apply_to_term(&theirs) == mine && other.apply_to_term(&mine) == theirs
            })
    }
}

/// Compose `var ↦ term` into `bindings`, which must be fully composed.
///
/// The term is resolved against the existing bindings first, so it contains
/// no bound variable; `var` is then replaced by it inside every existing
/// value. One step reaches the fixpoint. On error `bindings` may be partly
/// rewritten, so callers only ever pass a private candidate map.
fn insert(
    bindings: &mut HashMap<Var, Term>,
    var: Var,
    term: Term,
    renaming: Renaming,
) -> Result<()> {
    let value = apply(bindings, &term);

    if let Some(existing) = bindings.get(&var) {
        if *existing == value {
            return Ok(());
        }
        log::debug!(
            target: targets::SUBSTITUTION,
            "Conflicting bindings for {var:?}: {existing} and {value}"
        );
        return Err(FolError::SubstitutionConflict {
            var,
            existing: existing.clone(),
            incoming: value,
        });
    }

    if value.is_var(&var) {
        return match renaming {
            Renaming::Collapse => {
                log::trace!(target: targets::SUBSTITUTION, "Dropping {var:?} ↦ {term}, already implied");
                Ok(())
            }
            Renaming::Reject => {
                log::debug!(target: targets::SUBSTITUTION, "Renaming cycle through {var:?}");
                Err(FolError::CircularSubstitution { var, term })
            }
        };
    }

    if value.occurs(&var) {
        log::debug!(target: targets::SUBSTITUTION, "Circular binding {var:?} ↦ {value}");
        return Err(FolError::CircularSubstitution { var, term: value });
    }

    for bound in bindings.values_mut() {
        if bound.occurs(&var) {
            *bound = replace(bound, &var, &value);
        }
    }
    log::trace!(target: targets::SUBSTITUTION, "Bound {var:?} ↦ {value}");
    bindings.insert(var, value);
    Ok(())
}

// A single lookup per variable is enough while `bindings` is idempotent.
fn apply(bindings: &HashMap<Var, Term>, term: &Term) -> Term {
    match term {
        Term::Var(var) => match bindings.get(var) {
            Some(bound) => bound.clone(),
            None => term.clone(),
        },
        Term::Const(_) => term.clone(),
        Term::App(fn_sym, args) => Term::App(
            fn_sym.clone(),
            args.iter().map(|arg| apply(bindings, arg)).collect(),
        ),
    }
}

fn replace(term: &Term, var: &Var, value: &Term) -> Term {
    match term {
        Term::Var(v) if v == var => value.clone(),
        Term::Var(_) | Term::Const(_) => term.clone(),
        Term::App(fn_sym, args) => Term::App(
            fn_sym.clone(),
            args.iter().map(|arg| replace(arg, var, value)).collect(),
        ),
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.sorted_bindings().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ {}", var, term)?;
        }
        write!(f, "}}")
    }
}
