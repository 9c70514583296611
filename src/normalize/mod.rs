//! Normalization of sentences toward conjunctive normal form.
//!
//! Three structural passes, composable in sequence:
//!
//! 1. [`Normalizer::simplify`] rewrites `=>` and `<=>` away, leaving only
//!    `∧ ∨ ¬ ∀ ∃` over predicates.
//! 2. [`Normalizer::negate_inwards`] pushes negation down to the predicates
//!    (negation normal form).
//! 3. [`Normalizer::clean`] removes single-operand `∧`/`∨` nodes.
//!
//! Conjunctive normal form would continue from [`Normalizer::standardize`]
//! (steps 1 and 2) with skolemization, dropping universal quantifiers and
//! distributing `∨` over `∧`. Those steps are not implemented.

use crate::error::{FolError, Result};
use crate::misc::log::targets;
use crate::syntax::{Operands, Quantifier, Sentence, Var};

/// Options for the normalization passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeConfig {
    /// Also collapse `∧`/`∨` nodes left with a single operand while pushing
    /// negation inwards, instead of leaving them for [`Normalizer::clean`].
    pub collapse_unary: bool,
}

impl NormalizeConfig {
    pub fn new() -> Self {
        NormalizeConfig::default()
    }

    pub fn collapse_unary(mut self, collapse: bool) -> Self {
        self.collapse_unary = collapse;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    fn dual(self) -> Junction {
        match self {
            Junction::And => Junction::Or,
            Junction::Or => Junction::And,
        }
    }

    fn build(self, operands: Operands) -> Sentence {
        match self {
            Junction::And => Sentence::And(operands),
            Junction::Or => Sentence::Or(operands),
        }
    }
}

/// Runs the normalization passes under a [`NormalizeConfig`].
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Normalizer { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Rewrite to the connectives `∧ ∨ ¬ ∀ ∃`.
    ///
    /// `p => q` becomes `¬p ∨ q`, and `p <=> q` becomes
    /// `(p => q) ∧ (q => p)`, each side simplified in turn. A single-operand
    /// `∧`/`∨` becomes its operand.
    pub fn simplify(&self, sentence: &Sentence) -> Sentence {
        match sentence {
            Sentence::Predicate(_) => sentence.clone(),
            Sentence::Not(inner) => Sentence::not(self.simplify(inner)),
            Sentence::And(ops) => match ops.sole() {
                Some(only) => self.simplify(only),
                None => Sentence::And(ops.map(|op| self.simplify(op))),
            },
            Sentence::Or(ops) => match ops.sole() {
                Some(only) => self.simplify(only),
                None => Sentence::Or(ops.map(|op| self.simplify(op))),
            },
            Sentence::Implies(antecedent, consequent) => Sentence::disjunction(
                Sentence::not(self.simplify(antecedent)),
                self.simplify(consequent),
            ),
            Sentence::Iff(pair) => {
                let (p, q) = (pair.first(), pair.second());
                Sentence::conjunction(
                    self.simplify(&Sentence::implies(p.clone(), q.clone())),
                    self.simplify(&Sentence::implies(q.clone(), p.clone())),
                )
            }
            Sentence::ForAll(var, body) => Sentence::forall(var.clone(), self.simplify(body)),
            Sentence::Exists(var, body) => Sentence::exists(var.clone(), self.simplify(body)),
        }
    }

    /// Push negation down to the predicates, negating the whole sentence
    /// first when `negate` is set.
    ///
    /// Only defined on simplified sentences; `=>` and `<=>` fail with
    /// [`FolError::UnsimplifiedConnective`].
    pub fn negate_inwards(&self, sentence: &Sentence, negate: bool) -> Result<Sentence> {
        match sentence {
            Sentence::Predicate(_) if negate => Ok(Sentence::not(sentence.clone())),
            Sentence::Predicate(_) => Ok(sentence.clone()),
            Sentence::Not(inner) => self.negate_inwards(inner, !negate),
            Sentence::And(ops) => self.negate_junction(Junction::And, ops, negate),
            Sentence::Or(ops) => self.negate_junction(Junction::Or, ops, negate),
            Sentence::ForAll(var, body) => {
                self.negate_quantified(Quantifier::ForAll, var, body, negate)
            }
            Sentence::Exists(var, body) => {
                self.negate_quantified(Quantifier::Exists, var, body, negate)
            }
            Sentence::Implies(_, _) | Sentence::Iff(_) => {
                log::debug!(target: targets::NORMALIZATION, "Unsimplified connective in {}", sentence);
                Err(FolError::UnsimplifiedConnective {
                    connective: sentence.connective_name(),
                })
            }
        }
    }

    fn negate_junction(&self, junction: Junction, ops: &Operands, negate: bool) -> Result<Sentence> {
        let operands = ops.try_map(|op| self.negate_inwards(op, negate))?;
        if self.config.collapse_unary {
            if let Some(only) = operands.sole() {
                return Ok(only.clone());
            }
        }
        let junction = if negate { junction.dual() } else { junction };
        Ok(junction.build(operands))
    }

    fn negate_quantified(
        &self,
        quantifier: Quantifier,
        var: &Var,
        body: &Sentence,
        negate: bool,
    ) -> Result<Sentence> {
        let body = self.negate_inwards(body, negate)?;
        let quantifier = if negate { quantifier.dual() } else { quantifier };
        Ok(quantifier.bind(var.clone(), body))
    }

    /// Remove single-operand `∧`/`∨` nodes everywhere.
    pub fn clean(&self, sentence: &Sentence) -> Sentence {
        match sentence {
            Sentence::Predicate(_) => sentence.clone(),
            Sentence::Not(inner) => Sentence::not(self.clean(inner)),
            Sentence::And(ops) => match ops.sole() {
                Some(only) => self.clean(only),
                None => Sentence::And(ops.map(|op| self.clean(op))),
            },
            Sentence::Or(ops) => match ops.sole() {
                Some(only) => self.clean(only),
                None => Sentence::Or(ops.map(|op| self.clean(op))),
            },
            Sentence::Implies(antecedent, consequent) => {
                Sentence::implies(self.clean(antecedent), self.clean(consequent))
            }
            Sentence::Iff(pair) => Sentence::Iff(pair.map(|op| self.clean(op))),
            Sentence::ForAll(var, body) => Sentence::forall(var.clone(), self.clean(body)),
            Sentence::Exists(var, body) => Sentence::exists(var.clone(), self.clean(body)),
        }
    }

    /// Simplify, then push negation inwards: the part of CNF conversion
    /// that is implemented.
    pub fn standardize(&self, sentence: &Sentence) -> Result<Sentence> {
        log::trace!(target: targets::NORMALIZATION, "Standardizing {}", sentence);
        let simplified = self.simplify(sentence);
        self.negate_inwards(&simplified, false)
    }
}

impl Sentence {
    /// See [`Normalizer::simplify`].
    pub fn simplified(&self) -> Sentence {
        Normalizer::default().simplify(self)
    }

    /// Push negation down to the predicates. See
    /// [`Normalizer::negate_inwards`].
    pub fn negate_inwards(&self) -> Result<Sentence> {
        Normalizer::default().negate_inwards(self, false)
    }

    pub fn negate_inwards_with(&self, negate: bool) -> Result<Sentence> {
        Normalizer::default().negate_inwards(self, negate)
    }

    /// See [`Normalizer::clean`].
    pub fn cleaned(&self) -> Sentence {
        Normalizer::default().clean(self)
    }

    /// See [`Normalizer::standardize`].
    pub fn standardized(&self) -> Result<Sentence> {
        Normalizer::default().standardize(self)
    }
}
