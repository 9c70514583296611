//! Unification: computing most general unifiers for first-order terms and
//! atomic sentences, on top of a self-composing substitution engine.

mod substitution;
mod unify;

pub use substitution::Substitution;
pub use unify::{unify, unify_many, unify_predicates, unify_sentences, UnifyError, UnifyResult};
