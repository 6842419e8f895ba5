//! Nominal types: the base case of every composition.

use shapecast_foundation::{Outcome, Primitive, Result, Value};

use crate::meta::Meta;
use crate::ty::Coerce;

/// A class check against a [`Primitive`].
///
/// `call` never fails; `try` and `is_valid` check the class.
#[derive(Clone, Debug)]
pub struct Nominal {
    primitive: Primitive,
    meta: Meta,
}

impl Nominal {
    /// Creates a nominal type.
    #[must_use]
    pub fn new(primitive: Primitive, meta: Meta) -> Self {
        Self { primitive, meta }
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
}

impl PartialEq for Nominal {
    fn eq(&self, other: &Self) -> bool {
        self.primitive == other.primitive
    }
}

impl Coerce for Nominal {
    fn call(&self, input: Value) -> Result<Value> {
        Ok(input)
    }

    fn try_call(&self, input: Value) -> Outcome {
        if self.primitive.matches(&input) {
            Outcome::Success(input)
        } else {
            let message = format!("{input:?} must be an instance of {}", self.primitive);
            Outcome::failure(input, message)
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.primitive.matches(input)
    }

    fn name(&self) -> String {
        self.primitive.name().to_string()
    }

    fn primitive(&self) -> Primitive {
        self.primitive
    }
}
