//! Constructor types: coercion functions in front of a type.

use std::sync::Arc;

use shapecast_foundation::{Outcome, Primitive, Result, Value};

use crate::func::Func;
use crate::ty::{Coerce, Type};

/// A type preceded by a chain of coercion functions.
///
/// Functions run in order, then the wrapped type receives the result.
#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    inner: Arc<Type>,
    fns: Vec<Func>,
}

impl Constructor {
    /// Creates a constructor type with a single function.
    #[must_use]
    pub fn new(inner: Type, func: Func) -> Self {
        Self::from_parts(inner, vec![func])
    }

    /// Creates a constructor type from a function chain.
    #[must_use]
    pub fn from_parts(inner: Type, fns: Vec<Func>) -> Self {
        Self {
            inner: Arc::new(inner),
            fns,
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }

    /// Returns the function chain in application order.
    #[must_use]
    pub fn functions(&self) -> &[Func] {
        &self.fns
    }

    /// Returns a copy that runs `func` after the existing functions.
    #[must_use]
    pub fn append(&self, func: Func) -> Self {
        let mut fns = self.fns.clone();
        fns.push(func);
        Self {
            inner: self.inner.clone(),
            fns,
        }
    }

    /// Returns a copy that runs `func` before the existing functions.
    #[must_use]
    pub fn prepend(&self, func: Func) -> Self {
        let mut fns = Vec::with_capacity(self.fns.len() + 1);
        fns.push(func);
        fns.extend(self.fns.iter().cloned());
        Self {
            inner: self.inner.clone(),
            fns,
        }
    }

    /// Returns a copy wrapping `inner` instead.
    #[must_use]
    pub fn with_inner(&self, inner: Type) -> Self {
        Self::from_parts(inner, self.fns.clone())
    }

    /// Runs the function chain without the wrapped type.
    ///
    /// # Errors
    ///
    /// Returns the first function error.
    pub fn coerce(&self, input: Value) -> Result<Value> {
        self.fns.iter().try_fold(input, |value, func| func.call(value))
    }
}

impl Coerce for Constructor {
    fn call(&self, input: Value) -> Result<Value> {
        self.inner.call(self.coerce(input)?)
    }

    fn try_call(&self, input: Value) -> Outcome {
        match self.coerce(input.clone()) {
            Ok(value) => self.inner.try_call(value),
            Err(error) => Outcome::failure(input, error.to_string()),
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.coerce(input.clone())
            .is_ok_and(|value| self.inner.is_valid(&value))
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}
