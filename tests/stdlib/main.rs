//! Integration tests for Layer 3: Stdlib
//!
//! Tests for the built-in type families resolved through a bootstrapped
//! registry.

mod coercible;
mod families;

use shapecast_foundation::Value;
use shapecast_types::{Coerce, Registry};

/// A registry with every built-in family.
pub fn registry() -> Registry {
    shapecast_stdlib::standard_registry().unwrap()
}

/// Applies the registered type `identifier` to `input`.
pub fn coerce(identifier: &str, input: impl Into<Value>) -> shapecast_foundation::Result<Value> {
    registry().get(identifier)?.call(input.into())
}
