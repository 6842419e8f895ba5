//! Wrappers that change how failures and absent input are handled.

use std::sync::Arc;

use shapecast_foundation::{Outcome, Primitive, Result, Value};

use crate::ty::{Coerce, Type};

/// Returns the original input from `call` instead of raising.
///
/// `try` is not affected.
#[derive(Clone, Debug, PartialEq)]
pub struct Safe {
    inner: Arc<Type>,
}

impl Safe {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Type) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

impl Coerce for Safe {
    fn call(&self, input: Value) -> Result<Value> {
        Ok(self.inner.call(input.clone()).unwrap_or(input))
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.inner.try_call(input)
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.inner.is_valid(input)
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}

/// Like [`Safe`], over a copy of the type with every constraint removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Lax {
    inner: Arc<Type>,
}

impl Lax {
    /// Strips constraints from `inner` and wraps the result.
    #[must_use]
    pub fn new(inner: Type) -> Self {
        Self {
            inner: Arc::new(inner.strip_constraints()),
        }
    }

    /// Returns the stripped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

impl Coerce for Lax {
    fn call(&self, input: Value) -> Result<Value> {
        Ok(self.inner.call(input.clone()).unwrap_or(input))
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.inner.try_call(input)
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.inner.is_valid(input)
    }

    fn name(&self) -> String {
        self.inner.name()
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}

/// Maps nil and undefined to nil; other input goes through the type.
#[derive(Clone, Debug, PartialEq)]
pub struct Maybe {
    inner: Arc<Type>,
}

impl Maybe {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Type) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the wrapped type.
    #[must_use]
    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

impl Coerce for Maybe {
    fn call(&self, input: Value) -> Result<Value> {
        if input.is_absent() {
            Ok(Value::Nil)
        } else {
            self.inner.call(input)
        }
    }

    fn try_call(&self, input: Value) -> Outcome {
        if input.is_absent() {
            Outcome::Success(Value::Nil)
        } else {
            self.inner.try_call(input)
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        input.is_absent() || self.inner.is_valid(input)
    }

    fn name(&self) -> String {
        format!("maybe<{}>", self.inner.name())
    }

    fn primitive(&self) -> Primitive {
        self.inner.primitive()
    }
}
