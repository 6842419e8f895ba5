//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Primitive, Outcome, Error, and persistent collections.

mod errors;
mod outcomes;
mod values;
