//! Entry points for building types from primitives.

use shapecast_foundation::{Primitive, Value};
use shapecast_logic::Rule;

use crate::meta::Meta;
use crate::nominal::Nominal;
use crate::ty::Type;

/// A nominal type over `primitive`: `call` passes input through,
/// `try` checks the class.
#[must_use]
pub fn nominal(primitive: Primitive) -> Type {
    Type::Nominal(Nominal::new(primitive, Meta::new()))
}

/// The type accepting every value.
#[must_use]
pub fn any() -> Type {
    nominal(Primitive::Any)
}

/// A nominal type constrained by `type?(primitive)`: `call` raises on
/// values of any other class.
#[must_use]
pub fn strict(primitive: Primitive) -> Type {
    nominal(primitive).constrained_by(type_rule(primitive), shapecast_logic::standard())
}

/// The `type?` rule for `primitive`.
#[must_use]
pub fn type_rule(primitive: Primitive) -> Rule {
    Rule::predicate("type?", vec![Value::from(primitive.name())])
}
