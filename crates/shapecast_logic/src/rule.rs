//! Composable rule trees.
//!
//! A [`Rule`] is plain data: predicate names with their arguments, joined
//! by conjunction and disjunction. Evaluating a rule needs a
//! [`PredicateSet`] that knows what each predicate means.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};
use shapecast_foundation::Value;

use crate::predicates::PredicateSet;

/// A single predicate application, e.g. `min_size?(5)`.
///
/// The checked value is always the last, implicit argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Predicate name including the trailing `?`.
    pub name: String,
    /// Arguments bound at compile time.
    pub args: Vec<Value>,
}

impl Predicate {
    /// Creates a predicate application.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    fn describe_with(&self, input: Option<&Value>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut first = true;
        for arg in self.args.iter().chain(input) {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{arg:?}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe_with(None, f)
    }
}

/// A predicate expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A single predicate.
    Predicate(Predicate),
    /// Both sides must hold; the right side is not evaluated if the left fails.
    And(Box<Rule>, Box<Rule>),
    /// Either side must hold; the right side is not evaluated if the left holds.
    Or(Box<Rule>, Box<Rule>),
}

/// Result of evaluating a rule against a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the rule held.
    pub success: bool,
    /// Human-readable account of the deciding predicate(s).
    pub explanation: String,
}

impl Rule {
    /// Creates a rule from a single predicate.
    #[must_use]
    pub fn predicate(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self::Predicate(Predicate::new(name, args))
    }

    /// Conjunction of two rules.
    #[must_use]
    pub fn and(self, other: Rule) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of two rules.
    #[must_use]
    pub fn or(self, other: Rule) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the rule against `input`.
    #[must_use]
    pub fn evaluate(&self, predicates: &dyn PredicateSet, input: &Value) -> Evaluation {
        match self {
            Self::Predicate(predicate) => Evaluation {
                success: predicates.call(predicate, input),
                explanation: Applied(predicate, input).to_string(),
            },
            Self::And(left, right) => {
                let left = left.evaluate(predicates, input);
                if left.success {
                    right.evaluate(predicates, input)
                } else {
                    left
                }
            }
            Self::Or(left, right) => {
                let left = left.evaluate(predicates, input);
                if left.success {
                    return left;
                }
                let right = right.evaluate(predicates, input);
                if right.success {
                    right
                } else {
                    Evaluation {
                        success: false,
                        explanation: format!("{} or {}", left.explanation, right.explanation),
                    }
                }
            }
        }
    }

    /// Returns every predicate in the rule, left to right.
    #[must_use]
    pub fn predicates(&self) -> Vec<&Predicate> {
        match self {
            Self::Predicate(p) => vec![p],
            Self::And(l, r) | Self::Or(l, r) => {
                let mut out = l.predicates();
                out.extend(r.predicates());
                out
            }
        }
    }

    /// Finds the first predicate with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Predicate> {
        self.predicates().into_iter().find(|p| p.name == name)
    }
}

impl BitAnd for Rule {
    type Output = Rule;

    fn bitand(self, rhs: Rule) -> Rule {
        self.and(rhs)
    }
}

impl BitOr for Rule {
    type Output = Rule;

    fn bitor(self, rhs: Rule) -> Rule {
        self.or(rhs)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(p) => write!(f, "{p}"),
            Self::And(l, r) => write!(f, "{l} AND {r}"),
            Self::Or(l, r) => write!(f, "({l} OR {r})"),
        }
    }
}

/// A predicate shown with the checked value appended: `min_size?(5, "x") failed`.
struct Applied<'a>(&'a Predicate, &'a Value);

impl fmt::Display for Applied<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.describe_with(Some(self.1), f)?;
        write!(f, " failed")
    }
}
