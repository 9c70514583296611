//! folcore: first-order logic terms and sentences with unification.
//!
//! This crate represents terms and sentences as immutable trees and provides
//! the operations symbolic reasoning is built from:
//! - [`unify`](unify::unify): most general unifiers of terms and atomic
//!   sentences,
//! - [`Substitution`](unify::Substitution): variable bindings that stay fully
//!   composed, rejecting conflicting and circular bindings,
//! - [`normalize`]: simplification, negation normal form and cleanup of
//!   sentences, the first steps of conjunctive normal form conversion.

pub mod error;
pub mod misc;
pub mod normalize;
pub mod syntax;
pub mod unify;

pub use error::{FolError, Result};
