//! Operand containers for the associative and symmetric connectives.

use std::collections::btree_set;
use std::collections::BTreeSet;

use super::Sentence;
use crate::error::{Arity, FolError, Result};

/// The operands of an `And` or an `Or`: a non-empty set.
///
/// Duplicates collapse and order is irrelevant. Elements are kept sorted, so
/// the derived `Hash` agrees with set equality and an `Operands` can itself
/// be stored in further sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operands(BTreeSet<Sentence>);

impl Operands {
    /// Collect operands for `connective`, failing when there are none.
    pub fn new(
        connective: &'static str,
        operands: impl IntoIterator<Item = Sentence>,
    ) -> Result<Self> {
        let set: BTreeSet<Sentence> = operands.into_iter().collect();
        let expected = Arity::AtLeast(1);
        if !expected.admits(set.len()) {
            return Err(FolError::Arity {
                connective,
                expected,
                found: set.len(),
            });
        }
        Ok(Operands(set))
    }

    pub fn pair(first: Sentence, second: Sentence) -> Self {
        Operands(BTreeSet::from([first, second]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Sentence> {
        self.0.iter()
    }

    /// The only operand, when there is exactly one.
    pub fn sole(&self) -> Option<&Sentence> {
        if self.0.len() == 1 {
            self.0.iter().next()
        } else {
            None
        }
    }

    pub fn map(&self, f: impl FnMut(&Sentence) -> Sentence) -> Operands {
        Operands(self.0.iter().map(f).collect())
    }

    pub fn try_map(&self, f: impl FnMut(&Sentence) -> Result<Sentence>) -> Result<Operands> {
        Ok(Operands(self.0.iter().map(f).collect::<Result<_>>()?))
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Sentence;
    type IntoIter = btree_set::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The operands of an `Iff`, stored in canonical order.
///
/// `Pair::new(p, q) == Pair::new(q, p)`. If both operands are equal the
/// element is kept twice rather than collapsing, so an `Iff` always has two
/// operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    first: Box<Sentence>,
    second: Box<Sentence>,
}

impl Pair {
    pub fn new(a: Sentence, b: Sentence) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Pair {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn first(&self) -> &Sentence {
        &self.first
    }

    pub fn second(&self) -> &Sentence {
        &self.second
    }

    /// True for `p <=> p`.
    pub fn is_repeated(&self) -> bool {
        self.first == self.second
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        [self.first.as_ref(), self.second.as_ref()].into_iter()
    }

    pub fn map(&self, mut f: impl FnMut(&Sentence) -> Sentence) -> Pair {
        Pair::new(f(&self.first), f(&self.second))
    }

    pub fn try_map(&self, mut f: impl FnMut(&Sentence) -> Result<Sentence>) -> Result<Pair> {
        Ok(Pair::new(f(&self.first)?, f(&self.second)?))
    }
}
