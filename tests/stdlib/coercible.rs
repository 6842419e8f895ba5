//! Integration tests for coercible types

use shapecast_foundation::Value;
use shapecast_types::Coerce;

use crate::coerce;

#[test]
fn integer_literals() {
    assert_eq!(coerce("coercible.integer", "0x1f").unwrap(), Value::Int(31));
    assert_eq!(coerce("coercible.integer", "1_000").unwrap(), Value::Int(1000));
    assert_eq!(coerce("coercible.integer", 9.99).unwrap(), Value::Int(9));
    assert!(coerce("coercible.integer", Value::Nil).unwrap_err().is_coercion());
}

#[test]
fn strings_and_symbols() {
    assert_eq!(coerce("coercible.string", 12).unwrap(), Value::from("12"));
    assert_eq!(coerce("coercible.string", Value::Nil).unwrap(), Value::from(""));
    assert_eq!(coerce("coercible.symbol", "x").unwrap(), Value::symbol("x"));
}

#[test]
fn collections() {
    assert_eq!(coerce("coercible.array", 1).unwrap(), Value::array_of([1]));
    assert_eq!(
        coerce("coercible.hash", Value::Nil).unwrap(),
        Value::from_pairs(Vec::<(Value, Value)>::new())
    );
}

#[test]
fn optional_and_maybe_variants() {
    assert_eq!(coerce("optional.coercible.integer", Value::Nil).unwrap(), Value::Nil);
    assert_eq!(coerce("optional.coercible.integer", "5").unwrap(), Value::Int(5));
    assert_eq!(coerce("maybe.coercible.float", Value::Undefined).unwrap(), Value::Nil);
    assert_eq!(coerce("maybe.coercible.float", "2").unwrap(), Value::Float(2.0));
}

#[test]
fn constrained_coercible_keeps_coercion_errors() {
    let t = crate::registry()
        .get("coercible.integer")
        .unwrap()
        .constrained([("gt", 0)])
        .unwrap();
    assert!(t.call(Value::from("abc")).unwrap_err().is_coercion());
    assert!(t.call(Value::from("0")).unwrap_err().is_constraint());
    assert_eq!(t.call(Value::from("5")).unwrap(), Value::Int(5));
}
