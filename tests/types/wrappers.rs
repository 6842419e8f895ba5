//! Integration tests for safe, lax and maybe

use shapecast_foundation::{Primitive, Value};
use shapecast_types::builder::strict;
use shapecast_types::{Coerce, Type};

use crate::registry;

fn short_string() -> Type {
    registry()
        .get("coercible.string")
        .unwrap()
        .constrained([("min_size", 5)])
        .unwrap()
}

#[test]
fn safe_returns_original_input() {
    let t = short_string();
    assert!(t.call(Value::from("x")).unwrap_err().is_constraint());
    assert_eq!(t.safe().call(Value::from("x")).unwrap(), Value::from("x"));
    assert_eq!(t.safe().call(Value::Int(123_456)).unwrap(), Value::from("123456"));
}

#[test]
fn safe_and_lax_are_idempotent() {
    let t = short_string();
    assert_eq!(t.safe().safe(), t.safe());
    assert_eq!(t.lax().lax(), t.lax());
    assert_eq!(t.lax().safe(), t.lax());
}

#[test]
fn lax_drops_constraints() {
    let t = short_string().lax();
    assert_eq!(t.call(Value::from("x")).unwrap(), Value::from("x"));
    assert!(t.try_call(Value::from("x")).is_success());
}

#[test]
fn lax_reaches_into_arrays() {
    let t = registry().get("array<strict.integer>").unwrap().lax();
    assert_eq!(
        t.call(Value::array_of(["1"])).unwrap(),
        Value::array_of(["1"])
    );
}

#[test]
fn maybe_maps_absent_to_nil() {
    let t = strict(Primitive::Int).maybe();
    assert!(t.is_optional());
    assert_eq!(t.call(Value::Nil).unwrap(), Value::Nil);
    assert_eq!(t.call(Value::Undefined).unwrap(), Value::Nil);
    assert_eq!(t.call(Value::Int(1)).unwrap(), Value::Int(1));
    assert!(t.call(Value::from("1")).is_err());
    assert_eq!(t.name(), "maybe<integer>");
    assert!(t.default(Value::Nil).is_err());
}
