//! Integration tests for Layer 2: Types
//!
//! Tests for nominal, constrained, constructor, sum, default, enum, array
//! and wrapper types.

mod combinators;
mod wrappers;

use shapecast_types::Registry;

/// A registry with every built-in family.
pub fn registry() -> Registry {
    shapecast_stdlib::standard_registry().unwrap()
}
