//! Default types: a fallback value for absent input.

use std::sync::Arc;

use shapecast_foundation::{Outcome, Primitive, Result, Value};

use crate::func::Func;
use crate::ty::{Coerce, Type};

/// Where a default value comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    /// A fixed value.
    Literal(Value),
    /// A function called with undefined each time a default is needed.
    Callable(Func),
}

impl DefaultValue {
    /// Produces the default.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing callable.
    pub fn evaluate(&self) -> Result<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Callable(func) => func.call(Value::Undefined),
        }
    }
}

/// A type that fills in a default for undefined or nil input, and for
/// input the wrapped type turns into nil.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultType {
    inner: Arc<Type>,
    value: DefaultValue,
}

impl DefaultType {
    /// Creates a default type without validating the default.
    #[must_use]
    pub fn new(inner: Type, value: DefaultValue) -> Self {
        Self {
            inner: Arc::new(inner),
            value,
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }

    /// Returns the default source.
    #[must_use]
    pub fn value(&self) -> &DefaultValue {
        &self.value
    }

    /// Returns true if the default is computed on demand.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self.value, DefaultValue::Callable(_))
    }

    /// Returns a copy wrapping `inner` instead.
    #[must_use]
    pub fn with_inner(&self, inner: Type) -> Self {
        Self::new(inner, self.value.clone())
    }

    fn try_evaluate(&self) -> Outcome {
        match self.value.evaluate() {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::failure(Value::Undefined, error.to_string()),
        }
    }
}

impl Coerce for DefaultType {
    fn call(&self, input: Value) -> Result<Value> {
        if input.is_absent() {
            return self.value.evaluate();
        }
        let value = self.inner.call(input)?;
        if value.is_nil() {
            self.value.evaluate()
        } else {
            Ok(value)
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        if input.is_absent() {
            return self.try_evaluate();
        }
        match self.inner.try_call(input) {
            Outcome::Success(Value::Nil) => self.try_evaluate(),
            outcome => outcome,
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        input.is_undefined() || self.inner.is_valid(input)
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}
