//! Sentences: first-order formulas over predicates.

use std::collections::HashSet;
use std::fmt;

use super::operands::{Operands, Pair};
use super::predicate::Predicate;
use super::term::{Contains, Term, Var};
use crate::error::{Arity, FolError, Result};
use crate::misc::log::targets;
use crate::unify::Substitution;

/// Propositional connectives, for building sentences from operand lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub fn name(self) -> &'static str {
        match self {
            Connective::Not => "not",
            Connective::And => "and",
            Connective::Or => "or",
            Connective::Implies => "implies",
            Connective::Iff => "iff",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connective::Not => "¬",
            Connective::And => "∧",
            Connective::Or => "∨",
            Connective::Implies => "=>",
            Connective::Iff => "<=>",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Connective::Not => Arity::Exactly(1),
            Connective::And | Connective::Or => Arity::AtLeast(1),
            Connective::Implies | Connective::Iff => Arity::Exactly(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub fn name(self) -> &'static str {
        match self {
            Quantifier::ForAll => "forall",
            Quantifier::Exists => "exists",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::ForAll => "∀",
            Quantifier::Exists => "∃",
        }
    }

    /// The quantifier a negation turns this one into.
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::ForAll => Quantifier::Exists,
            Quantifier::Exists => Quantifier::ForAll,
        }
    }

    /// Build `self var. body`.
    pub fn bind(self, var: Var, body: Sentence) -> Sentence {
        match self {
            Quantifier::ForAll => Sentence::ForAll(var, Box::new(body)),
            Quantifier::Exists => Sentence::Exists(var, Box::new(body)),
        }
    }
}

/// A first-order sentence.
///
/// The variant set is closed: every pass over sentences matches on all of
/// them. `And`/`Or` hold a set of operands and `Iff` an unordered pair, so
/// equality and hashing ignore operand order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentence {
    Predicate(Predicate),
    Not(Box<Sentence>),
    And(Operands),
    Or(Operands),
    Implies(Box<Sentence>, Box<Sentence>),
    Iff(Pair),
    ForAll(Var, Box<Sentence>),
    Exists(Var, Box<Sentence>),
}

impl Sentence {
    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Self {
        Sentence::Predicate(Predicate::new(name, args))
    }

    pub fn not(inner: Sentence) -> Self {
        Sentence::Not(Box::new(inner))
    }

    /// Conjunction of one or more operands.
    pub fn and(operands: impl IntoIterator<Item = Sentence>) -> Result<Self> {
        Ok(Sentence::And(Operands::new(Connective::And.name(), operands)?))
    }

    /// Disjunction of one or more operands.
    pub fn or(operands: impl IntoIterator<Item = Sentence>) -> Result<Self> {
        Ok(Sentence::Or(Operands::new(Connective::Or.name(), operands)?))
    }

    pub fn conjunction(left: Sentence, right: Sentence) -> Self {
        Sentence::And(Operands::pair(left, right))
    }

    pub fn disjunction(left: Sentence, right: Sentence) -> Self {
        Sentence::Or(Operands::pair(left, right))
    }

    pub fn implies(antecedent: Sentence, consequent: Sentence) -> Self {
        Sentence::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(left: Sentence, right: Sentence) -> Self {
        Sentence::Iff(Pair::new(left, right))
    }

    pub fn forall(var: Var, body: Sentence) -> Self {
        Sentence::ForAll(var, Box::new(body))
    }

    pub fn exists(var: Var, body: Sentence) -> Self {
        Sentence::Exists(var, Box::new(body))
    }

    /// Build a sentence from a connective and an operand list, checking the
    /// operand count.
    pub fn connect(connective: Connective, operands: Vec<Sentence>) -> Result<Self> {
        let found = operands.len();
        match connective {
            Connective::And => return Sentence::and(operands),
            Connective::Or => return Sentence::or(operands),
            _ => {}
        }
        let mut operands = operands.into_iter();
        match (connective, operands.next(), operands.next(), operands.next()) {
            (Connective::Not, Some(inner), None, _) => Ok(Sentence::not(inner)),
            (Connective::Implies, Some(antecedent), Some(consequent), None) => {
                Ok(Sentence::implies(antecedent, consequent))
            }
            (Connective::Iff, Some(left), Some(right), None) => Ok(Sentence::iff(left, right)),
            _ => Err(FolError::Arity {
                connective: connective.name(),
                expected: connective.arity(),
                found,
            }),
        }
    }

    /// Build a quantified sentence from an operand list, which must hold
    /// exactly one body.
    pub fn quantify(quantifier: Quantifier, var: Var, operands: Vec<Sentence>) -> Result<Self> {
        let found = operands.len();
        let mut operands = operands.into_iter();
        match (operands.next(), found) {
            (Some(body), 1) => Ok(quantifier.bind(var, body)),
            _ => Err(FolError::Arity {
                connective: quantifier.name(),
                expected: Arity::Exactly(1),
                found,
            }),
        }
    }

    /// Name of the top connective, or `"predicate"` for a leaf.
    pub fn connective_name(&self) -> &'static str {
        match self {
            Sentence::Predicate(_) => "predicate",
            Sentence::Not(_) => Connective::Not.name(),
            Sentence::And(_) => Connective::And.name(),
            Sentence::Or(_) => Connective::Or.name(),
            Sentence::Implies(_, _) => Connective::Implies.name(),
            Sentence::Iff(_) => Connective::Iff.name(),
            Sentence::ForAll(_, _) => Quantifier::ForAll.name(),
            Sentence::Exists(_, _) => Quantifier::Exists.name(),
        }
    }

    pub fn quantifier(&self) -> Option<(Quantifier, &Var, &Sentence)> {
        match self {
            Sentence::ForAll(var, body) => Some((Quantifier::ForAll, var, body)),
            Sentence::Exists(var, body) => Some((Quantifier::Exists, var, body)),
            _ => None,
        }
    }

    /// Immediate sub-sentences, in storage order.
    pub fn children(&self) -> Vec<&Sentence> {
        match self {
            Sentence::Predicate(_) => Vec::new(),
            Sentence::Not(inner) => vec![inner.as_ref()],
            Sentence::And(ops) | Sentence::Or(ops) => ops.iter().collect(),
            Sentence::Implies(antecedent, consequent) => {
                vec![antecedent.as_ref(), consequent.as_ref()]
            }
            Sentence::Iff(pair) => pair.iter().collect(),
            Sentence::ForAll(_, body) | Sentence::Exists(_, body) => vec![body.as_ref()],
        }
    }

    /// Variables occurring in predicates and not bound by an enclosing
    /// quantifier.
    pub fn free_variables(&self) -> HashSet<Var> {
        match self {
            Sentence::Predicate(p) => p.variables(),
            Sentence::ForAll(var, body) | Sentence::Exists(var, body) => {
                let mut free = body.free_variables();
                free.remove(var);
                free
            }
            _ => self
                .children()
                .into_iter()
                .flat_map(|child| child.free_variables())
                .collect(),
        }
    }

    /// Apply a substitution down to the predicate leaves.
    ///
    /// Fails with [`FolError::QuantifiedVariableSubstitution`] if the
    /// substitution binds a variable some quantifier in this sentence binds,
    /// or if it would move such a variable into the quantifier's scope.
    pub fn substitute(&self, subst: &Substitution) -> Result<Sentence> {
        Ok(match self {
            Sentence::Predicate(p) => Sentence::Predicate(p.apply_subst(subst)),
            Sentence::Not(inner) => Sentence::not(inner.substitute(subst)?),
            Sentence::And(ops) => Sentence::And(ops.try_map(|s| s.substitute(subst))?),
            Sentence::Or(ops) => Sentence::Or(ops.try_map(|s| s.substitute(subst))?),
            Sentence::Implies(antecedent, consequent) => Sentence::implies(
                antecedent.substitute(subst)?,
                consequent.substitute(subst)?,
            ),
            Sentence::Iff(pair) => Sentence::Iff(pair.try_map(|s| s.substitute(subst))?),
            Sentence::ForAll(var, body) => {
                self.substitute_quantified(Quantifier::ForAll, var, body, subst)?
            }
            Sentence::Exists(var, body) => {
                self.substitute_quantified(Quantifier::Exists, var, body, subst)?
            }
        })
    }

    fn substitute_quantified(
        &self,
        quantifier: Quantifier,
        var: &Var,
        body: &Sentence,
        subst: &Substitution,
    ) -> Result<Sentence> {
        self.guard_bound_variable(var, body, subst)?;
        Ok(quantifier.bind(var.clone(), body.substitute(subst)?))
    }

    fn guard_bound_variable(&self, var: &Var, body: &Sentence, subst: &Substitution) -> Result<()> {
        let rebinds = subst.get(var).is_some();
        let captures = || {
            body.free_variables()
                .iter()
                .any(|free| subst.get(free).is_some_and(|value| value.occurs(var)))
        };
        if rebinds || captures() {
            log::debug!(
                target: targets::SUBSTITUTION,
                "Refusing {subst} under quantified variable {var:?}"
            );
            return Err(FolError::QuantifiedVariableSubstitution {
                var: var.clone(),
                sentence: self.clone(),
            });
        }
        Ok(())
    }
}

impl From<Predicate> for Sentence {
    fn from(predicate: Predicate) -> Self {
        Sentence::Predicate(predicate)
    }
}

impl Contains<Sentence> for Sentence {
    fn contains(&self, needle: &Sentence) -> bool {
        self == needle || self.children().into_iter().any(|child| child.contains(needle))
    }
}

impl Contains<Term> for Sentence {
    fn contains(&self, needle: &Term) -> bool {
        match self {
            Sentence::Predicate(p) => p.contains(needle),
            _ => self.children().into_iter().any(|child| child.contains(needle)),
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    symbol: &str,
    operands: impl Iterator<Item = &'a Sentence>,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, operand) in operands.enumerate() {
        if i > 0 {
            write!(f, " {} ", symbol)?;
        }
        write!(f, "{}", operand)?;
    }
    write!(f, ")")
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Predicate(p) => write!(f, "{}", p),
            Sentence::Not(inner) => write!(f, "{}{}", Connective::Not.symbol(), inner),
            Sentence::And(ops) => write_joined(f, Connective::And.symbol(), ops.iter()),
            Sentence::Or(ops) => write_joined(f, Connective::Or.symbol(), ops.iter()),
            Sentence::Implies(antecedent, consequent) => write_joined(
                f,
                Connective::Implies.symbol(),
                [antecedent.as_ref(), consequent.as_ref()].into_iter(),
            ),
            Sentence::Iff(pair) => write_joined(f, Connective::Iff.symbol(), pair.iter()),
            Sentence::ForAll(var, body) => {
                write!(f, "{} {} [{}]", Quantifier::ForAll.symbol(), var, body)
            }
            Sentence::Exists(var, body) => {
                write!(f, "{} {} [{}]", Quantifier::Exists.symbol(), var, body)
            }
        }
    }
}
