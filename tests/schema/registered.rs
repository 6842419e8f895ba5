//! Integration tests for schemas built on registered hash and array types

use shapecast_foundation::{ErrorKind, Value};
use shapecast_types::{Coerce, Key, Type};

use crate::{registry, symbols};

fn account(base: &str) -> Type {
    let registry = registry();
    registry
        .get(base)
        .unwrap()
        .schema([
            Key::new(Value::symbol("email"), registry.get("strict.string").unwrap()),
            Key::new(Value::symbol("age"), registry.get("params.integer").unwrap()),
        ])
        .unwrap()
}

// =============================================================================
// Error kinds survive the hash class check
// =============================================================================

#[test]
fn missing_key_on_registered_hash() {
    for base in ["hash", "strict.hash"] {
        let err = account(base).call(symbols([("email", "a@b.com")])).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::MissingKey(ref k) if *k == Value::symbol("age")),
            "{base}: {err}"
        );
    }
}

#[test]
fn unknown_keys_on_registered_hash() {
    let t = account("strict.hash").strict().unwrap();
    let input = symbols([
        ("email", Value::from("a@b.com")),
        ("age", Value::from("20")),
        ("extra", Value::from("x")),
    ]);
    match t.call(input).unwrap_err().kind {
        ErrorKind::UnknownKeys(keys) => assert_eq!(keys, vec![Value::symbol("extra")]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn key_errors_on_registered_hash() {
    let input = symbols([("email", Value::from("a@b.com")), ("age", Value::from("old"))]);
    match account("hash").call(input).unwrap_err().kind {
        ErrorKind::Schema { key, source, .. } => {
            assert_eq!(key, Value::symbol("age"));
            assert!(source.is_coercion());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn registered_hash_still_checks_its_class() {
    let err = account("strict.hash").call(Value::from("a@b.com")).unwrap_err();
    assert!(err.is_coercion());
    assert!(account("strict.hash").try_call(Value::Nil).is_failure());
}

#[test]
fn registered_hash_success() {
    let input = symbols([("email", Value::from("a@b.com")), ("age", Value::from("20"))]);
    assert_eq!(
        account("hash").call(input).unwrap(),
        symbols([("email", Value::from("a@b.com")), ("age", Value::Int(20))])
    );
}

// =============================================================================
// Arrays of schemas
// =============================================================================

#[test]
fn array_of_schemas_keeps_element_errors() {
    let registry = registry();
    let t = registry.get("array").unwrap().of(account("hash")).unwrap();
    let input = Value::array_of([
        symbols([("email", Value::from("a@b.com")), ("age", Value::from("1"))]),
        symbols([("email", "c@d.com")]),
    ]);
    let err = t.call(input).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingKey(_)), "{err}");
    assert_eq!(err.context.unwrap().path, vec!["1"]);
}

#[test]
fn parametrized_array_keeps_coercion_errors() {
    let err = registry()
        .get("array<params.integer>")
        .unwrap()
        .call(Value::array_of(["1", "x"]))
        .unwrap_err();
    assert!(err.is_coercion());
}
