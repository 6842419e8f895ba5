//! Integration tests for permissive schema resolution

use shapecast_foundation::{ErrorKind, Explanation, Outcome, Primitive, Value};
use shapecast_types::builder::nominal;
use shapecast_types::{ApplyOptions, Coerce, Key};

use crate::{person, registry, symbols};

// =============================================================================
// Present keys
// =============================================================================

#[test]
fn coerces_declared_keys_and_drops_extras() {
    let input = symbols([
        ("name", Value::from("Jane")),
        ("age", Value::from("21")),
        ("extra", Value::from("x")),
    ]);
    assert_eq!(
        person().call(input).unwrap(),
        symbols([("name", Value::from("Jane")), ("age", Value::Int(21))])
    );
}

#[test]
fn failing_key_names_itself() {
    let input = symbols([("name", Value::from("Jane")), ("age", Value::from("old"))]);
    let err = person().call(input).unwrap_err();
    match err.kind {
        ErrorKind::Schema { key, value, .. } => {
            assert_eq!(key, Value::symbol("age"));
            assert_eq!(value, Value::from("old"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn non_hash_input_is_a_coercion_error() {
    assert!(person().call(Value::from("Jane")).unwrap_err().is_coercion());
    assert!(person().try_call(Value::Nil).is_failure());
}

// =============================================================================
// Missing keys
// =============================================================================

#[test]
fn missing_required_key() {
    let err = person()
        .call(symbols([("name", "Jane")]))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingKey(ref k) if *k == Value::symbol("age")));
}

#[test]
fn default_fills_missing_key() {
    let registry = registry();
    let t = nominal(Primitive::Hash)
        .schema([
            Key::new(Value::symbol("name"), registry.get("strict.string").unwrap()),
            Key::new(
                Value::symbol("age"),
                registry.get("params.integer").unwrap().default(21).unwrap(),
            ),
        ])
        .unwrap();
    assert_eq!(
        t.call(symbols([("name", "Jane")])).unwrap(),
        symbols([("name", Value::from("Jane")), ("age", Value::Int(21))])
    );
}

#[test]
fn omittable_keys_may_be_absent() {
    let registry = registry();
    let t = nominal(Primitive::Hash)
        .schema([
            Key::new(Value::symbol("name"), registry.get("strict.string").unwrap()),
            Key::new(
                Value::symbol("nickname"),
                registry.get("strict.string").unwrap().omittable(),
            ),
        ])
        .unwrap();
    assert_eq!(
        t.call(symbols([("name", "Jane")])).unwrap(),
        symbols([("name", "Jane")])
    );
}

#[test]
fn required_flag_can_be_overridden() {
    let registry = registry();
    let t = nominal(Primitive::Hash)
        .schema([Key::new(Value::symbol("age"), registry.get("params.integer").unwrap())
            .required(false)])
        .unwrap();
    let empty = symbols(Vec::<(&str, Value)>::new());
    assert_eq!(t.call(empty.clone()).unwrap(), empty);
}

// =============================================================================
// Apply options
// =============================================================================

#[test]
fn partial_application_skips_missing_and_defaults() {
    let registry = registry();
    let t = nominal(Primitive::Hash)
        .schema([
            Key::new(Value::symbol("name"), registry.get("strict.string").unwrap()),
            Key::new(
                Value::symbol("age"),
                registry.get("params.integer").unwrap().default(21).unwrap(),
            ),
        ])
        .unwrap();
    assert_eq!(
        t.apply(symbols(Vec::<(&str, Value)>::new()), ApplyOptions::partial())
            .unwrap(),
        symbols(Vec::<(&str, Value)>::new())
    );
    let defaults_only = ApplyOptions::partial().with_resolve_defaults(true);
    assert_eq!(
        t.apply(symbols(Vec::<(&str, Value)>::new()), defaults_only).unwrap(),
        symbols([("age", 21)])
    );
}

#[test]
fn apply_on_non_schemas_is_call() {
    let t = registry().get("params.integer").unwrap();
    assert_eq!(
        t.apply(Value::from("3"), ApplyOptions::partial()).unwrap(),
        Value::Int(3)
    );
}

// =============================================================================
// Try
// =============================================================================

#[test]
fn try_reports_every_key() {
    let outcome = person().try_call(symbols([("age", "old")]));
    let Outcome::Failure { input, error } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(input, symbols([("age", "old")]));
    let Explanation::Keys(entries) = &error else {
        panic!("expected per-key explanation");
    };
    assert_eq!(entries.len(), 2);
    let name = error.key(&Value::symbol("name")).unwrap();
    assert_eq!(name.error(), Some(&Explanation::message("is missing")));
    assert!(error.key(&Value::symbol("age")).unwrap().is_failure());
}

#[test]
fn try_success_matches_call() {
    let input = symbols([("name", Value::from("Jane")), ("age", Value::from("5"))]);
    assert_eq!(
        person().try_call(input.clone()),
        Outcome::Success(person().call(input).unwrap())
    );
}
