//! Syntax types for first-order logic terms, predicates and sentences.

mod operands;
mod predicate;
mod sentence;
mod term;

pub use operands::{Operands, Pair};
pub use predicate::Predicate;
pub use sentence::{Connective, Quantifier, Sentence};
pub use term::{Constant, Contains, FnSym, Term, Var};
