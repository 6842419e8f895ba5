//! Integration tests for registries and references

use shapecast_foundation::{ErrorKind, Primitive, Value};
use shapecast_types::builder::nominal;
use shapecast_types::{Ast, Coerce, Key, Meta, Registry, Type};

use crate::standard;

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn unknown_identifiers() {
    let err = standard().get("strict.unicorn").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownType(_)));
    assert!(standard().get("array<strict.unicorn>").is_err());
    assert!(standard().get("strict.integer<strict.string>").is_err());
}

#[test]
fn parametrized_hash_lookup() {
    let registry = standard();
    let t = registry.get("hash<strict.symbol, params.integer>").unwrap();
    let input = Value::from_pairs([(Value::symbol("a"), Value::from("1"))]);
    assert_eq!(
        t.call(input).unwrap(),
        Value::from_pairs([(Value::symbol("a"), Value::Int(1))])
    );
}

#[test]
fn nested_parametrized_lookup() {
    let registry = standard();
    let t = registry.get("array<array<params.integer>>").unwrap();
    let input = Value::array_of([Value::array_of(["1", "2"]), Value::array_of(["3"])]);
    assert_eq!(
        t.call(input).unwrap(),
        Value::array_of([Value::array_of([1, 2]), Value::array_of([3])])
    );
    assert_eq!(registry.get("array<array<params.integer>>").unwrap(), t);
}

#[test]
fn registration_is_insert_if_absent() {
    let registry = standard();
    let err = registry
        .register("strict.integer", nominal(Primitive::Int))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyRegistered(_)));
    assert!(registry.get("strict.integer").unwrap().call(Value::from("1")).is_err());
}

#[test]
fn build_names_the_type() {
    let registry = standard();
    let err = registry.build("params.integer", Value::from("x")).unwrap_err();
    match err.kind {
        ErrorKind::Struct { name, .. } => assert_eq!(name, "params.integer"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        registry.build("params.integer", Value::from("4")).unwrap(),
        Value::Int(4)
    );
}

// =============================================================================
// References
// =============================================================================

fn tree(registry: &Registry) -> Type {
    nominal(Primitive::Hash)
        .schema([
            Key::new(Value::symbol("value"), registry.get("params.integer").unwrap()),
            Key::new(
                Value::symbol("children"),
                nominal(Primitive::Array)
                    .of(registry.reference("tree"))
                    .unwrap()
                    .default(Value::array_of(Vec::<Value>::new()))
                    .unwrap(),
            ),
        ])
        .unwrap()
}

fn node(value: &str, children: Vec<Value>) -> Value {
    Value::from_pairs([
        (Value::symbol("value"), Value::from(value)),
        (Value::symbol("children"), Value::array_of(children)),
    ])
}

#[test]
fn recursive_types_resolve_lazily() {
    let registry = standard();
    registry.register("tree", tree(&registry)).unwrap();

    let input = node("1", vec![node("2", vec![]), node("3", vec![node("4", vec![])])]);
    let output = registry.build("tree", input).unwrap();
    let children = output
        .as_hash()
        .unwrap()
        .get(&Value::symbol("children"))
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(children.len(), 2);
    let leaf = children.get(1).unwrap().as_hash().unwrap().get(&Value::symbol("children"));
    assert_eq!(leaf.unwrap().as_array().unwrap().len(), 1);
}

#[test]
fn recursive_types_fail_deep_inside() {
    let registry = standard();
    registry.register("tree", tree(&registry)).unwrap();
    let input = node("1", vec![node("x", vec![])]);
    assert!(registry.build("tree", input.clone()).is_err());
    assert!(registry.get("tree").unwrap().try_call(input).is_failure());
}

#[test]
fn references_compile_from_named_nodes() {
    let registry = standard();
    registry.register("tree", tree(&registry)).unwrap();
    let ast = registry.get("tree").unwrap().to_ast();
    let compiled = registry.compile(&ast).unwrap();
    assert_eq!(compiled, registry.get("tree").unwrap());

    let named = registry
        .compile(&Ast::Named {
            identifier: "tree".to_string(),
            meta: Meta::new(),
        })
        .unwrap();
    assert_eq!(named.name(), "tree");
    assert!(named.call(node("5", vec![])).is_ok());
}

#[test]
fn unresolved_reference_fails_on_use() {
    let registry = Registry::new();
    let t = registry.reference("later");
    assert!(t.call(Value::Int(1)).is_err());
    registry
        .register("later", standard().get("params.integer").unwrap())
        .unwrap();
    assert_eq!(t.call(Value::from("2")).unwrap(), Value::Int(2));
}

#[test]
fn reference_outliving_its_registry() {
    let t = {
        let registry = Registry::new();
        registry.reference("gone")
    };
    let err = t.call(Value::Int(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
}

// =============================================================================
// Sharing across threads
// =============================================================================

#[test]
fn shared_registry_across_threads() {
    let registry = standard();
    std::thread::scope(|scope| {
        for i in 0..8i64 {
            let registry = registry.clone();
            scope.spawn(move || {
                let name = format!("worker.{i}");
                registry.register(name.as_str(), nominal(Primitive::Int)).unwrap();
                let ints = registry.get("array<params.integer>").unwrap();
                let input = Value::array_of([i.to_string()]);
                assert_eq!(ints.call(input).unwrap(), Value::array_of([Value::Int(i)]));
                assert!(registry.register("strict.integer", nominal(Primitive::Int)).is_err());
            });
        }
    });
    assert!((0..8).all(|i| registry.contains(&format!("worker.{i}"))));
}
