//! Enum types: a fixed value set, addressable by index.

use std::sync::Arc;

use shapecast_foundation::{Outcome, Primitive, Result, Value};

use crate::ty::{Coerce, Type};

/// A constrained type whose values are listed up front.
///
/// Input equal to a member is kept as is; a non-negative integer in range
/// that is not itself a member resolves to the member at that index.
/// Either way the result goes through the constrained type.
#[derive(Clone, Debug, PartialEq)]
pub struct Enum {
    inner: Arc<Type>,
    values: Arc<[Value]>,
}

impl Enum {
    /// Creates an enum over an already constrained type.
    #[must_use]
    pub fn new(inner: Type, values: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(inner),
            values: values.into(),
        }
    }

    /// Returns the constrained type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }

    /// Returns the members in declaration order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns the position of `value` among the members.
    #[must_use]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Returns a copy wrapping `inner` instead.
    #[must_use]
    pub fn with_inner(&self, inner: Type) -> Self {
        Self {
            inner: Arc::new(inner),
            values: self.values.clone(),
        }
    }

    fn resolve(&self, input: Value) -> Value {
        if self.values.contains(&input) {
            return input;
        }
        match input {
            Value::Int(index) => usize::try_from(index)
                .ok()
                .and_then(|i| self.values.get(i))
                .cloned()
                .unwrap_or(input),
            other => other,
        }
    }
}

impl Coerce for Enum {
    fn call(&self, input: Value) -> Result<Value> {
        self.inner.call(self.resolve(input))
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.inner.try_call(self.resolve(input))
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.inner.is_valid(&self.resolve(input.clone()))
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}
