//! Integration tests for AST round trips

use shapecast_foundation::{ErrorKind, Primitive, Value};
use shapecast_types::builder::nominal;
use shapecast_types::{Ast, AstOptions, Coerce, Key, Type};

use crate::standard;

fn user(registry: &shapecast_types::Registry) -> Type {
    nominal(Primitive::Hash)
        .symbolized([
            Key::new(Value::symbol("name"), registry.get("strict.string").unwrap()),
            Key::new(
                Value::symbol("age"),
                registry
                    .get("params.integer")
                    .unwrap()
                    .constrained([("gteq", 0)])
                    .unwrap(),
            ),
            Key::new(
                Value::symbol("tags"),
                registry
                    .get("array<coercible.symbol>")
                    .unwrap()
                    .default(Value::array_of(Vec::<Value>::new()))
                    .unwrap(),
            ),
            Key::new(
                Value::symbol("born"),
                registry.get("optional.json.date").unwrap(),
            ),
        ])
        .unwrap()
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn bootstrapped_types_survive_bytes() {
    let source = standard();
    let bytes = user(&source).to_ast().to_bytes().unwrap();

    let target = standard();
    let compiled = target.compile(&Ast::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(compiled, user(&source));

    let input = Value::from_pairs([
        ("name", Value::from("Jane")),
        ("age", Value::from("30")),
        ("born", Value::from("1994-05-06")),
    ]);
    assert_eq!(
        compiled.call(input.clone()).unwrap(),
        user(&source).call(input).unwrap()
    );
}

#[test]
fn every_registered_type_round_trips() {
    let registry = standard();
    for identifier in registry.identifiers() {
        let t = registry.get(&identifier).unwrap();
        let compiled = registry.compile(&t.to_ast()).unwrap();
        assert_eq!(compiled, t, "{identifier}");
    }
}

#[test]
fn ast_tags_are_stable() {
    let registry = standard();
    assert_eq!(registry.get("params.integer").unwrap().to_ast().tag(), "constructor");
    assert_eq!(registry.get("strict.integer").unwrap().to_ast().tag(), "constrained");
    assert_eq!(registry.get("any").unwrap().to_ast().tag(), "any");
    assert_eq!(registry.get("maybe.strict.integer").unwrap().to_ast().tag(), "maybe");
    assert_eq!(registry.get("optional.strict.integer").unwrap().to_ast().tag(), "sum");
}

#[test]
fn meta_can_be_left_out() {
    let t = standard()
        .get("strict.string")
        .unwrap()
        .with_meta("doc", "a name");
    let with = t.to_ast();
    let without = t.to_ast_with(AstOptions::without_meta());
    assert_ne!(with, without);
    let compiled = standard().compile(&without).unwrap();
    assert!(compiled.meta().is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn garbage_bytes_are_a_serialization_error() {
    let err = Ast::from_bytes(&[0xc1, 0x00, 0x13]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
}

#[test]
fn empty_enum_is_invalid() {
    let ast = Ast::Enum {
        ty: Box::new(nominal(Primitive::String).to_ast()),
        values: Vec::new(),
    };
    let err = standard().compile(&ast).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidAst(_)));
}
