//! Constrained types: a type plus a rule on its coerced output.

use std::sync::Arc;

use shapecast_foundation::{Error, Outcome, Primitive, Result, Value};
use shapecast_logic::{PredicateSet, Rule};

use crate::ty::{Coerce, Type};

/// A type whose output must satisfy a [`Rule`].
///
/// The wrapped type runs first; the rule only sees its successful output.
/// `call` raises the wrapped type's own error unchanged, so a constrained
/// schema still reports missing or unknown keys. The predicate set is not
/// part of equality.
#[derive(Clone, Debug)]
pub struct Constrained {
    inner: Arc<Type>,
    rule: Rule,
    predicates: Arc<dyn PredicateSet>,
}

impl Constrained {
    /// Creates a constrained type.
    #[must_use]
    pub fn new(inner: Type, rule: Rule, predicates: Arc<dyn PredicateSet>) -> Self {
        Self {
            inner: Arc::new(inner),
            rule,
            predicates,
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }

    /// Returns the rule.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the predicate set evaluating the rule.
    #[must_use]
    pub fn predicates(&self) -> &Arc<dyn PredicateSet> {
        &self.predicates
    }

    /// Returns a copy whose rule also requires `rule`.
    #[must_use]
    pub fn and(&self, rule: Rule) -> Self {
        Self {
            inner: self.inner.clone(),
            rule: self.rule.clone() & rule,
            predicates: self.predicates.clone(),
        }
    }

    /// Returns a copy wrapping `inner` instead.
    #[must_use]
    pub fn with_inner(&self, inner: Type) -> Self {
        Self {
            inner: Arc::new(inner),
            rule: self.rule.clone(),
            predicates: self.predicates.clone(),
        }
    }

    fn check(&self, value: Value) -> Outcome {
        let evaluation = self.rule.evaluate(&*self.predicates, &value);
        if evaluation.success {
            Outcome::Success(value)
        } else {
            Outcome::failure(value, evaluation.explanation)
        }
    }
}

impl PartialEq for Constrained {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.rule == other.rule
    }
}

impl Coerce for Constrained {
    fn call(&self, input: Value) -> Result<Value> {
        let value = self.inner.call(input)?;
        match self.check(value) {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { input, error } => Err(Error::constraint(input, error.to_string())),
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        match self.inner.try_call(input) {
            Outcome::Success(value) => self.check(value),
            failure @ Outcome::Failure { .. } => failure,
        }
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}
