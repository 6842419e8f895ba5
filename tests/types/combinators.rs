//! Integration tests for scalar combinators

use shapecast_foundation::{ErrorKind, Explanation, Primitive, Value};
use shapecast_types::builder::{any, nominal, strict};
use shapecast_types::{Coerce, Func, Type};

use crate::registry;

// =============================================================================
// Nominal and Strict
// =============================================================================

#[test]
fn nominal_call_passes_anything() {
    let t = nominal(Primitive::Int);
    assert_eq!(t.call(Value::from("x")).unwrap(), Value::from("x"));
    assert!(t.try_call(Value::from("x")).is_failure());
    assert!(t.is_valid(&Value::Int(1)));
}

#[test]
fn strict_checks_class_on_call() {
    let err = strict(Primitive::Int).call(Value::from("1")).unwrap_err();
    assert!(err.is_constraint());
    assert_eq!(strict(Primitive::Int).call(Value::Int(1)).unwrap(), Value::Int(1));
}

#[test]
fn any_accepts_everything() {
    for v in [Value::Nil, Value::Undefined, Value::Int(1), Value::from("s")] {
        assert!(any().is_valid(&v));
    }
    assert_eq!(any().name(), "any");
}

// =============================================================================
// Constrained
// =============================================================================

#[test]
fn constraints_are_conjunctive() {
    let t = strict(Primitive::String)
        .constrained([("min_size", 2)])
        .unwrap()
        .constrained([("max_size", 4)])
        .unwrap();
    assert!(t.call(Value::from("a")).is_err());
    assert!(t.call(Value::from("abcde")).is_err());
    assert_eq!(t.call(Value::from("abc")).unwrap(), Value::from("abc"));
}

#[test]
fn constraints_see_the_coerced_value() {
    let t = registry()
        .get("params.integer")
        .unwrap()
        .constrained([("gt", 18)])
        .unwrap();
    assert_eq!(t.call(Value::from("19")).unwrap(), Value::Int(19));
    let err = t.call(Value::from("18")).unwrap_err();
    assert!(err.is_constraint());
    assert_eq!(err.value(), Some(&Value::Int(18)));
}

#[test]
fn unknown_constraint_is_an_error() {
    let err = strict(Primitive::Int).constrained([("sparkly", true)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownPredicate(_)));
}

// =============================================================================
// Constructor
// =============================================================================

#[test]
fn constructor_functions_run_in_order() {
    let trim = Func::named("it.types.trim", |v: Value| {
        Ok(v.as_str().map_or(v.clone(), |s| Value::from(s.trim())))
    });
    let upcase = Func::named("it.types.upcase", |v: Value| {
        Ok(v.as_str().map_or(v.clone(), |s| Value::from(s.to_uppercase())))
    });
    let t = strict(Primitive::String).constructor(trim).constructor(upcase);
    assert_eq!(t.call(Value::from("  ab ")).unwrap(), Value::from("AB"));
}

#[test]
fn prepend_runs_first() {
    let double = Func::named("it.types.double", |v: Value| {
        Ok(v.as_int().map_or(v.clone(), |n| Value::Int(n * 2)))
    });
    let t = registry()
        .get("coercible.integer")
        .unwrap()
        .prepend(double);
    // double sees the raw string and leaves it alone; to_int then parses it.
    assert_eq!(t.call(Value::from("4")).unwrap(), Value::Int(4));
    assert_eq!(t.call(Value::Int(4)).unwrap(), Value::Int(8));
}

#[test]
fn constructor_try_keeps_original_input() {
    let t = registry().get("coercible.integer").unwrap();
    let outcome = t.try_call(Value::from("abc"));
    assert!(outcome.is_failure());
    assert_eq!(outcome.input(), &Value::from("abc"));
    assert!(t.call(Value::from("abc")).unwrap_err().is_coercion());
}

// =============================================================================
// Sum
// =============================================================================

fn int_or_string() -> Type {
    strict(Primitive::Int) | strict(Primitive::String)
}

#[test]
fn sum_is_left_biased() {
    let t = int_or_string();
    assert_eq!(t.call(Value::Int(312)).unwrap(), Value::Int(312));
    assert_eq!(t.call(Value::from("312")).unwrap(), Value::from("312"));
    assert!(t.call(Value::from_pairs(Vec::<(Value, Value)>::new())).is_err());
}

#[test]
fn sum_try_lists_both_failures() {
    let outcome = int_or_string().try_call(Value::Nil);
    match outcome.error() {
        Some(Explanation::List(items)) => assert_eq!(items.len(), 2),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn sum_of_coercible_prefers_left_coercion() {
    let registry = registry();
    let t = registry.get("params.integer").unwrap() | registry.get("strict.string").unwrap();
    assert_eq!(t.call(Value::from("7")).unwrap(), Value::Int(7));
    assert_eq!(t.call(Value::from("seven")).unwrap(), Value::from("seven"));
}

#[test]
fn sum_name_and_rule() {
    let t = int_or_string();
    assert_eq!(t.name(), "integer | string");
    assert!(t.rule().is_some());
    assert_eq!(t.primitive(), Primitive::Any);
}

#[test]
fn optional_accepts_nil() {
    let t = strict(Primitive::Int).optional();
    assert!(t.is_optional());
    assert_eq!(t.call(Value::Nil).unwrap(), Value::Nil);
    assert_eq!(t.call(Value::Int(1)).unwrap(), Value::Int(1));
    assert!(t.call(Value::from("1")).is_err());
    assert_eq!(t.primitive(), Primitive::Int);
}

// =============================================================================
// Default
// =============================================================================

#[test]
fn default_fills_absent_input() {
    let t = strict(Primitive::Int).default(21).unwrap();
    assert!(t.is_default());
    assert_eq!(t.call(Value::Undefined).unwrap(), Value::Int(21));
    assert_eq!(t.call(Value::Nil).unwrap(), Value::Int(21));
    assert_eq!(t.call(Value::Int(3)).unwrap(), Value::Int(3));
}

#[test]
fn default_must_satisfy_the_type() {
    let err = strict(Primitive::Int).default("x").unwrap_err();
    assert!(err.is_constraint());
    let err = strict(Primitive::Int).optional().default(Value::Nil).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
}

#[test]
fn callable_default_runs_each_time() {
    let t = strict(Primitive::String).default_with(Func::named("it.types.fresh", |_| {
        Ok(Value::from("generated"))
    }));
    assert_eq!(t.call(Value::Undefined).unwrap(), Value::from("generated"));
    assert_eq!(t.call(Value::from("given")).unwrap(), Value::from("given"));
}

// =============================================================================
// Enum
// =============================================================================

fn status() -> Type {
    strict(Primitive::String)
        .enumeration(["draft", "published", "archived"])
        .unwrap()
}

#[test]
fn enum_resolves_index_and_value() {
    let t = status();
    assert_eq!(t.call(Value::Int(0)).unwrap(), Value::from("draft"));
    assert_eq!(t.call(Value::Int(2)).unwrap(), Value::from("archived"));
    assert_eq!(t.call(Value::from("draft")).unwrap(), Value::from("draft"));
}

#[test]
fn enum_rejects_outsiders() {
    let t = status();
    assert!(t.call(Value::from("oops")).unwrap_err().is_constraint());
    assert!(t.call(Value::Int(3)).is_err());
    assert!(t.call(Value::Int(-1)).is_err());
}

#[test]
fn enum_needs_values() {
    assert!(strict(Primitive::String).enumeration(Vec::<Value>::new()).is_err());
}

#[test]
fn enum_member_wins_over_index() {
    let t = strict(Primitive::Int).enumeration([1, 0]).unwrap();
    assert_eq!(t.call(Value::Int(0)).unwrap(), Value::Int(0));
    assert_eq!(t.call(Value::Int(1)).unwrap(), Value::Int(1));
}

// =============================================================================
// Meta
// =============================================================================

#[test]
fn meta_is_ignored_by_equality() {
    let a = strict(Primitive::Int).with_meta("doc", "age in years");
    let b = strict(Primitive::Int);
    assert_eq!(a, b);
    assert_eq!(a.meta().get("doc"), Some(&Value::from("age in years")));
    assert!(a.without_meta().meta().is_empty());
}
