//! Integration tests for hash schemas
//!
//! Tests for key resolution, strictness, defaults, key transforms, weak
//! schemas and apply options.

mod registered;
mod resolution;

use shapecast_foundation::{Primitive, Value};
use shapecast_types::builder::nominal;
use shapecast_types::{Key, Registry, Type};

/// A registry with every built-in family.
pub fn registry() -> Registry {
    shapecast_stdlib::standard_registry().unwrap()
}

/// `{name: strict.string, age: params.integer}` with symbol keys.
pub fn person_keys(registry: &Registry) -> Vec<Key> {
    vec![
        Key::new(Value::symbol("name"), registry.get("strict.string").unwrap()),
        Key::new(Value::symbol("age"), registry.get("params.integer").unwrap()),
    ]
}

/// A permissive person schema.
pub fn person() -> Type {
    nominal(Primitive::Hash)
        .schema(person_keys(&registry()))
        .unwrap()
}

/// Builds a hash with symbol keys.
pub fn symbols<V: Into<Value>>(pairs: impl IntoIterator<Item = (&'static str, V)>) -> Value {
    Value::from_pairs(pairs.into_iter().map(|(k, v)| (Value::symbol(k), v.into())))
}
