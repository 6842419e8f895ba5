//! Integration tests for Value and Primitive
//!
//! Tests construction, equality, hashing, ordering and class checks.

use shapecast_foundation::{Primitive, Value};
use std::collections::HashSet;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn undefined_is_not_nil() {
    assert!(Value::Undefined.is_undefined());
    assert!(!Value::Undefined.is_nil());
    assert!(Value::Undefined.is_absent());
    assert!(Value::Nil.is_absent());
    assert_ne!(Value::Undefined, Value::Nil);
}

#[test]
fn from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(3_i32), Value::Int(3));
    assert_eq!(Value::from(2.5), Value::Float(2.5));
    assert_eq!(Value::from("a").as_str(), Some("a"));
    assert_eq!(Value::from(None::<i64>), Value::Nil);
    assert_eq!(Value::from(vec![1, 2]), Value::array_of([1, 2]));
}

#[test]
fn symbols_and_strings_differ() {
    assert_ne!(Value::symbol("a"), Value::from("a"));
    assert_eq!(Value::symbol("a").name_str(), Value::from("a").name_str());
    assert_eq!(Value::symbol("a").as_symbol(), Some("a"));
}

#[test]
fn sizes() {
    assert_eq!(Value::from("héllo").size(), Some(5));
    assert_eq!(Value::array_of([1, 2, 3]).size(), Some(3));
    assert_eq!(Value::from_pairs([("a", 1)]).size(), Some(1));
    assert_eq!(Value::Int(1).size(), None);
}

// =============================================================================
// Equality and Hashing
// =============================================================================

#[test]
fn floats_compare_bitwise() {
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn values_work_as_set_members() {
    let set: HashSet<Value> = [Value::Int(1), Value::Int(1), Value::symbol("a")]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn hashes_compare_by_content() {
    let a = Value::from_pairs([("x", 1), ("y", 2)]);
    let b = Value::from_pairs([("y", 2), ("x", 1)]);
    assert_eq!(a, b);
}

#[test]
fn numbers_order_across_classes() {
    assert!(Value::Int(1) < Value::Float(1.5));
    assert!(Value::Float(2.0) > Value::Int(1));
    assert_eq!(Value::Int(1).partial_cmp(&Value::from("1")), None);
}

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn primitive_of_value() {
    assert_eq!(Value::Nil.primitive(), Primitive::Nil);
    assert_eq!(Value::from("s").primitive(), Primitive::String);
    assert_eq!(Value::Undefined.primitive(), Primitive::Any);
}

#[test]
fn primitive_matches() {
    assert!(Primitive::Int.matches(&Value::Int(1)));
    assert!(!Primitive::Int.matches(&Value::Float(1.0)));
    assert!(Primitive::Any.matches(&Value::Undefined));
    assert!(!Primitive::Nil.matches(&Value::Undefined));
}

#[test]
fn primitive_names_round_trip() {
    for p in Primitive::ALL {
        assert_eq!(Primitive::from_name(p.name()), Some(p));
    }
    assert_eq!(Primitive::from_name("decimal"), None);
}
