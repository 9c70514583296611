//! Unification algorithm: syntactic most general unifiers.
//!
//! There is no occurs check in the algorithm itself. Binding a variable goes
//! through the substitution engine, whose cycle detection rejects `x ↦ f(x)`.

use thiserror::Error;

use super::Substitution;
use crate::error::FolError;
use crate::misc::log::targets;
use crate::syntax::{Predicate, Sentence, Term, Var};

/// Result of a unification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// Unification succeeded with the given most general unifier.
    Success(Substitution),
    /// Unification failed.
    Failure(UnifyError),
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnifyResult::Failure(_))
    }

    /// The unifier, if there is one.
    pub fn ok(self) -> Option<Substitution> {
        match self {
            UnifyResult::Success(sigma) => Some(sigma),
            UnifyResult::Failure(_) => None,
        }
    }

    pub fn substitution(&self) -> Option<&Substitution> {
        match self {
            UnifyResult::Success(sigma) => Some(sigma),
            UnifyResult::Failure(_) => None,
        }
    }

    fn from_attempt(attempt: Result<Substitution, UnifyError>) -> Self {
        match attempt {
            Ok(sigma) => UnifyResult::Success(sigma),
            Err(err) => UnifyResult::Failure(err),
        }
    }
}

/// Reasons why unification can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// Occurs check failed: variable would occur in its own binding.
    #[error("{var} occurs in {term}")]
    OccursCheck { var: Var, term: Term },

    /// Function, constant or predicate symbols don't match.
    #[error("symbol clash: {expected} against {found}")]
    SymbolClash { expected: String, found: String },

    /// Arity mismatch for an application of the same symbol.
    #[error("{symbol} applied to {expected} and {found} arguments")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// A constant against a function application.
    #[error("{left} and {right} have different shapes")]
    ShapeMismatch { left: Term, right: Term },

    /// Two argument positions require different values for one variable.
    #[error("conflicting values for {var}: {existing} and {incoming}")]
    Conflict {
        var: Var,
        existing: Term,
        incoming: Term,
    },

    /// Sentences that are not (negated) predicates.
    #[error("can't unify {left} with {right}")]
    NotAtomic { left: String, right: String },

    #[error(transparent)]
    Substitution(FolError),
}

impl From<FolError> for UnifyError {
    fn from(err: FolError) -> Self {
        match err {
            FolError::CircularSubstitution { var, term } => UnifyError::OccursCheck { var, term },
            FolError::SubstitutionConflict {
                var,
                existing,
                incoming,
            } => UnifyError::Conflict {
                var,
                existing,
                incoming,
            },
            other => UnifyError::Substitution(other),
        }
    }
}

/// Compute the most general unifier of two terms.
///
/// A variable unifies with anything it does not occur in; when both sides
/// are variables the left one is bound to the right one. Applications unify
/// when their symbols and arities match and their arguments unify pairwise.
pub fn unify(t1: &Term, t2: &Term) -> UnifyResult {
    let attempt = unify_terms(t1, t2);
    report(&attempt, t1, t2);
    UnifyResult::from_attempt(attempt)
}

/// Compute the MGU of two predicates.
pub fn unify_predicates(p1: &Predicate, p2: &Predicate) -> UnifyResult {
    let attempt = unify_applications(&p1.name, &p1.args, &p2.name, &p2.args);
    report(&attempt, p1, p2);
    UnifyResult::from_attempt(attempt)
}

/// Compute the MGU of two atomic sentences.
///
/// Matching `Not` wrappers are peeled off; what remains must be two
/// predicates.
pub fn unify_sentences(s1: &Sentence, s2: &Sentence) -> UnifyResult {
    match (s1, s2) {
        (Sentence::Predicate(p1), Sentence::Predicate(p2)) => unify_predicates(p1, p2),
        (Sentence::Not(inner1), Sentence::Not(inner2)) => unify_sentences(inner1, inner2),
        _ => {
            log::debug!(target: targets::UNIFICATION, "No unifier for {} and {}: not atomic", s1, s2);
            UnifyResult::Failure(UnifyError::NotAtomic {
                left: s1.to_string(),
                right: s2.to_string(),
            })
        }
    }
}

/// Simultaneous unification of multiple term pairs.
///
/// Finds a substitution σ such that σ(t1ᵢ) = σ(t2ᵢ) for all pairs.
pub fn unify_many(pairs: &[(Term, Term)]) -> UnifyResult {
    let attempt = unify_pairs(pairs.iter().map(|(left, right)| (left, right)));
    if let Err(err) = &attempt {
        log::debug!(target: targets::UNIFICATION, "No simultaneous unifier for {} pairs: {}", pairs.len(), err);
    }
    UnifyResult::from_attempt(attempt)
}

fn report(attempt: &Result<Substitution, UnifyError>, left: &dyn std::fmt::Display, right: &dyn std::fmt::Display) {
    match attempt {
        Ok(sigma) => log::trace!(target: targets::UNIFICATION, "Unified {} and {} with {}", left, right, sigma),
        Err(err) => log::debug!(target: targets::UNIFICATION, "No unifier for {} and {}: {}", left, right, err),
    }
}

fn unify_terms(t1: &Term, t2: &Term) -> Result<Substitution, UnifyError> {
    if t1 == t2 {
        return Ok(Substitution::empty());
    }
    match (t1, t2) {
        (Term::Var(var), other) | (other, Term::Var(var)) => {
            Ok(Substitution::singleton(var.clone(), other.clone())?)
        }
        (Term::App(f, f_args), Term::App(g, g_args)) => {
            unify_applications(&f.name, f_args, &g.name, g_args)
        }
        (Term::Const(a), Term::Const(b)) => Err(UnifyError::SymbolClash {
            expected: a.name().to_string(),
            found: b.name().to_string(),
        }),
        _ => Err(UnifyError::ShapeMismatch {
            left: t1.clone(),
            right: t2.clone(),
        }),
    }
}

fn unify_applications(
    name1: &str,
    args1: &[Term],
    name2: &str,
    args2: &[Term],
) -> Result<Substitution, UnifyError> {
    if name1 != name2 {
        return Err(UnifyError::SymbolClash {
            expected: name1.to_string(),
            found: name2.to_string(),
        });
    }
    if args1.len() != args2.len() {
        return Err(UnifyError::ArityMismatch {
            symbol: name1.to_string(),
            expected: args1.len(),
            found: args2.len(),
        });
    }
    unify_pairs(args1.iter().zip(args2))
}

// Each pair is unified under the bindings found so far, then its unifier is
// merged in.
fn unify_pairs<'a>(
    pairs: impl Iterator<Item = (&'a Term, &'a Term)>,
) -> Result<Substitution, UnifyError> {
    let mut sigma = Substitution::empty();
    for (left, right) in pairs {
        let step = unify_terms(&sigma.apply_to_term(left), &sigma.apply_to_term(right))?;
        if !step.is_empty() {
            sigma = sigma.try_merge(&step)?;
        }
    }
    Ok(sigma)
}
