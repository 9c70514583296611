//! Predicates: the atomic sentences.

use std::collections::HashSet;
use std::fmt;

use super::term::{write_args, Contains, Term, Var};
use crate::unify::Substitution;

/// A predicate application.
///
/// Structurally identical to a function application, but it lives in the
/// sentence language: `Happy(x)` is a claim, `F(x)` is an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<Term>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Predicate {
            name: name.into(),
            args,
        }
    }

    /// Create a 0-ary predicate (proposition).
    pub fn prop(name: impl Into<String>) -> Self {
        Predicate::new(name, vec![])
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Collect all variables in this predicate.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        for arg in &self.args {
            arg.collect_variables(&mut set);
        }
        set
    }

    /// Check if this predicate is ground (contains no variables).
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Apply a substitution to this predicate.
    pub fn apply_subst(&self, subst: &Substitution) -> Predicate {
        subst.apply_to_predicate(self)
    }
}

impl Contains<Term> for Predicate {
    fn contains(&self, needle: &Term) -> bool {
        self.args.iter().any(|arg| arg.contains(needle))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write_args(f, &self.args)
    }
}
