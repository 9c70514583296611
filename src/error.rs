//! Error types for hard failures.
//!
//! Expected outcomes of search, such as two terms failing to unify or two
//! substitutions disagreeing during a merge, are not errors. They come back
//! as [`UnifyResult::Failure`](crate::unify::UnifyResult) or `None`.

use std::fmt;

use thiserror::Error;

use crate::syntax::{Sentence, Term, Var};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolError {
    #[error("substitutions disagree: {var} is {existing} and {incoming}")]
    SubstitutionConflict {
        var: Var,
        existing: Term,
        incoming: Term,
    },

    #[error("circular substitution: {var} occurs in {term}")]
    CircularSubstitution { var: Var, term: Term },

    #[error("can't substitute quantified variable {var} in {sentence}")]
    QuantifiedVariableSubstitution { var: Var, sentence: Sentence },

    #[error("{connective} takes {expected} operand(s), got {found}")]
    Arity {
        connective: &'static str,
        expected: Arity,
        found: usize,
    },

    #[error("negation can't be pushed through {connective}, simplify the sentence first")]
    UnsimplifiedConnective { connective: &'static str },
}

/// Number of operands a connective accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolError>;
