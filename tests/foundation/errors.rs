//! Integration tests for Error and ErrorContext

use shapecast_foundation::{Error, ErrorContext, ErrorKind, Value};

#[test]
fn kinds_are_matchable() {
    let err = Error::missing_key(Value::symbol("age"));
    assert!(matches!(err.kind, ErrorKind::MissingKey(ref k) if k == &Value::symbol("age")));
    assert_eq!(err.to_string(), ":age is missing in hash input");
}

#[test]
fn schema_errors_nest() {
    let inner = Error::constraint(Value::Int(-1), "gt?(0, -1) failed");
    let err = Error::schema(Value::symbol("age"), Value::Int(-1), inner);
    let ErrorKind::Schema { source, .. } = &err.kind else {
        panic!("expected a schema error");
    };
    assert!(source.is_constraint());
}

#[test]
fn paths_accumulate_outermost_first() {
    let err = Error::coercion(Value::from("x"), "not a number")
        .at("0")
        .at("items")
        .at("order");
    let context = err.context.unwrap();
    assert_eq!(context.path, vec!["order", "items", "0"]);
    assert_eq!(context.to_string(), "at order.items.0");
}

#[test]
fn context_with_type_name() {
    let context = ErrorContext::new().with_type_name("user");
    assert_eq!(context.to_string(), "in user");
}
