//! Integration tests for family registration

use shapecast_foundation::{ErrorKind, Primitive, Value};
use shapecast_stdlib::{BootstrapConfig, bootstrap};
use shapecast_types::{Coerce, FunctionRegistry, Registry};

use crate::{coerce, registry};

#[test]
fn every_primitive_has_a_strict_type() {
    let registry = registry();
    for p in Primitive::ALL {
        let nominal = format!("nominal.{}", p.name());
        assert!(registry.contains(&nominal), "{nominal}");
        if p != Primitive::Any {
            assert!(registry.contains(&format!("strict.{}", p.name())));
            assert!(registry.contains(p.name()));
        }
    }
}

#[test]
fn nominal_types_never_raise_on_call() {
    assert_eq!(coerce("nominal.integer", "x").unwrap(), Value::from("x"));
    assert!(!registry().get("nominal.integer").unwrap().is_valid(&Value::from("x")));
}

#[test]
fn bare_aliases_are_strict() {
    assert_eq!(registry().get("integer").unwrap(), registry().get("strict.integer").unwrap());
    assert!(coerce("string", 1).unwrap_err().is_constraint());
}

#[test]
fn selected_families_only() {
    let registry = Registry::new();
    let config = BootstrapConfig::minimal().with_params(true).with_optional(true);
    bootstrap(&registry, &config).unwrap();
    assert!(registry.contains("params.integer"));
    assert!(registry.contains("optional.params.integer"));
    assert!(registry.contains("optional.strict.integer"));
    assert!(!registry.contains("coercible.integer"));
    assert!(!registry.contains("maybe.params.integer"));
    let err = registry.get("json.integer").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownType(_)));
}

#[test]
fn second_bootstrap_is_rejected() {
    let registry = registry();
    let err = bootstrap(&registry, &BootstrapConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyRegistered(_)));
}

#[test]
fn coercion_functions_have_stable_handles() {
    let _ = registry();
    let functions = FunctionRegistry::global();
    for handle in ["coercible.to_integer", "params.to_bool", "json.to_symbol"] {
        let func = functions.get(handle).unwrap();
        assert_eq!(func.handle(), handle);
    }
}
