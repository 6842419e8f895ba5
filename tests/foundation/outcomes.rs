//! Integration tests for Outcome and Explanation

use shapecast_foundation::{Explanation, Outcome, Value};

#[test]
fn failure_keeps_best_effort_input() {
    let failure = Outcome::failure(Value::Int(3), "must be even");
    assert!(failure.is_failure());
    assert_eq!(failure.input(), &Value::Int(3));
    assert_eq!(failure.error().unwrap().to_string(), "must be even");
}

#[test]
fn map_only_touches_success() {
    let ok = Outcome::Success(Value::Int(1)).map(|_| Value::Int(2));
    assert_eq!(ok, Outcome::Success(Value::Int(2)));
    let failed = Outcome::failure(Value::Nil, "no").map(|_| Value::Int(2));
    assert_eq!(failed.into_input(), Value::Nil);
}

#[test]
fn into_result_raises_constraint_errors() {
    let err = Outcome::failure(Value::from("x"), "too short")
        .into_result()
        .unwrap_err();
    assert!(err.is_constraint());
    assert_eq!(err.value(), Some(&Value::from("x")));
}

#[test]
fn explanations_render() {
    let list = Explanation::List(vec!["a".into(), "b".into()]);
    assert_eq!(list.to_string(), "a or b");

    let element = Explanation::Element {
        index: 2,
        error: Box::new("bad".into()),
    };
    assert_eq!(element.to_string(), "[2] bad");

    let keys = Explanation::Keys(vec![
        (Value::symbol("a"), Outcome::Success(Value::Int(1))),
        (Value::symbol("b"), Outcome::failure(Value::Nil, "is missing")),
    ]);
    assert_eq!(keys.to_string(), ":b: is missing");
    assert_eq!(keys.failed_keys(), vec![&Value::symbol("b")]);
    assert!(keys.key(&Value::symbol("a")).unwrap().is_success());
}
