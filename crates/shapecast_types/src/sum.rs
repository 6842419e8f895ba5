//! Sum types: left-biased disjunction.

use std::sync::Arc;

use shapecast_foundation::{Explanation, Outcome, Primitive, Result, Value};
use shapecast_logic::Rule;

use crate::meta::Meta;
use crate::ty::{Coerce, Type};

/// `left | right`.
///
/// The left branch is tried first; the right branch only sees input the
/// left branch rejected.
#[derive(Clone, Debug)]
pub struct Sum {
    left: Arc<Type>,
    right: Arc<Type>,
    meta: Meta,
}

impl Sum {
    /// Creates a sum type.
    #[must_use]
    pub fn new(left: Type, right: Type) -> Self {
        Self {
            left: Arc::new(left),
            right: Arc::new(right),
            meta: Meta::new(),
        }
    }

    /// Returns the left branch.
    #[must_use]
    pub fn left(&self) -> &Type {
        &self.left
    }

    /// Returns the right branch.
    #[must_use]
    pub fn right(&self) -> &Type {
        &self.right
    }

    /// Returns the metadata.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns a copy with a new right branch.
    #[must_use]
    pub fn with_right(&self, right: Type) -> Self {
        Self {
            left: self.left.clone(),
            right: Arc::new(right),
            meta: self.meta.clone(),
        }
    }

    /// A sum is optional when its left branch is the nil class.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.left.primitive().is_nil()
    }

    /// The disjunction of both branch rules, when both branches are
    /// constrained.
    #[must_use]
    pub fn rule(&self) -> Option<Rule> {
        match (self.left.as_ref(), self.right.as_ref()) {
            (Type::Constrained(l), Type::Constrained(r)) => {
                Some(l.rule().clone() | r.rule().clone())
            }
            _ => None,
        }
    }
}

impl PartialEq for Sum {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl Coerce for Sum {
    fn call(&self, input: Value) -> Result<Value> {
        match self.left.try_call(input.clone()) {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { .. } => self.right.call(input),
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        let left_error = match self.left.try_call(input.clone()) {
            success @ Outcome::Success(_) => return success,
            Outcome::Failure { error, .. } => error,
        };
        match self.right.try_call(input) {
            success @ Outcome::Success(_) => success,
            Outcome::Failure { input, error } => Outcome::Failure {
                input,
                error: Explanation::List(vec![left_error, error]),
            },
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.left.is_valid(input) || self.right.is_valid(input)
    }

    fn name(&self) -> String {
        format!("{} | {}", self.left.name(), self.right.name())
    }

    fn primitive(&self) -> Primitive {
        let (left, right) = (self.left.primitive(), self.right.primitive());
        if left.is_nil() {
            right
        } else if left == right {
            left
        } else {
            Primitive::Any
        }
    }
}
