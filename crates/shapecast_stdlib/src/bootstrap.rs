//! Registers the built-in type families.
//!
//! Identifiers follow `<family>.<primitive name>`:
//!
//! ```text
//! nominal.integer             class check on try, pass-through on call
//! strict.integer  integer     class check on both
//! coercible.integer           conversion, then class check on try
//! params.integer              form-string conversion
//! json.date                   JSON-string conversion
//! optional.params.integer     params.nil | params.integer
//! maybe.strict.integer        strict.integer.maybe()
//! ```
//!
//! Coercion functions are registered under `<family>.to_<name>` handles,
//! so ASTs of bootstrapped types compile in any process that bootstraps.

use shapecast_foundation::{Primitive, Result, Value};
use shapecast_types::builder::{any, nominal, strict};
use shapecast_types::{Func, Registry, Type};
use tracing::debug;

use crate::config::BootstrapConfig;
use crate::{coercible, json, params};

type Conversion = fn(Value) -> Result<Value>;

const COERCIBLE: &[(Primitive, Conversion)] = &[
    (Primitive::String, coercible::to_string),
    (Primitive::Int, coercible::to_int),
    (Primitive::Float, coercible::to_float),
    (Primitive::Symbol, coercible::to_symbol),
    (Primitive::Array, coercible::to_array),
    (Primitive::Hash, coercible::to_hash),
];

const PARAMS: &[(Primitive, Conversion)] = &[
    (Primitive::Nil, params::to_nil),
    (Primitive::Bool, params::to_bool),
    (Primitive::Int, params::to_int),
    (Primitive::Float, params::to_float),
    (Primitive::Date, params::to_date),
    (Primitive::DateTime, params::to_date_time),
    (Primitive::Array, params::to_array),
    (Primitive::Hash, params::to_hash),
];

const JSON_CONVERTED: &[(Primitive, Conversion)] = &[
    (Primitive::Nil, json::to_nil),
    (Primitive::Date, json::to_date),
    (Primitive::DateTime, json::to_date_time),
    (Primitive::Symbol, json::to_symbol),
];

const JSON_NATIVE: &[Primitive] = &[
    Primitive::String,
    Primitive::Int,
    Primitive::Float,
    Primitive::Bool,
    Primitive::Array,
    Primitive::Hash,
];

/// A family of types registered under a common prefix.
struct Family {
    prefix: &'static str,
    types: Vec<(Primitive, Type)>,
}

impl Family {
    fn converted(prefix: &'static str, table: &[(Primitive, Conversion)]) -> Self {
        let types = table
            .iter()
            .map(|&(primitive, conversion)| {
                let handle = format!("{prefix}.to_{}", primitive.name());
                let func = Func::named(&handle, conversion);
                (primitive, nominal(primitive).constructor(func))
            })
            .collect();
        Self { prefix, types }
    }

    fn strict() -> Self {
        Self {
            prefix: "strict",
            types: concrete_primitives().map(|p| (p, strict(p))).collect(),
        }
    }

    fn json() -> Self {
        let mut family = Self::converted("json", JSON_CONVERTED);
        family
            .types
            .extend(JSON_NATIVE.iter().map(|&p| (p, strict(p))));
        family
    }

    fn nil_type(&self) -> Type {
        self.types
            .iter()
            .find(|(p, _)| p.is_nil())
            .map_or_else(|| strict(Primitive::Nil), |(_, t)| t.clone())
    }

    fn entries(&self) -> impl Iterator<Item = (String, Type)> + '_ {
        self.types
            .iter()
            .map(|(p, t)| (format!("{}.{}", self.prefix, p.name()), t.clone()))
    }

    fn optional_entries(&self) -> impl Iterator<Item = (String, Type)> + '_ {
        let nil = self.nil_type();
        self.types
            .iter()
            .filter(|(p, _)| !p.is_nil())
            .map(move |(p, t)| {
                (
                    format!("optional.{}.{}", self.prefix, p.name()),
                    nil.clone() | t.clone(),
                )
            })
    }

    fn maybe_entries(&self) -> impl Iterator<Item = (String, Type)> + '_ {
        self.types
            .iter()
            .filter(|(p, _)| !p.is_nil())
            .map(|(p, t)| (format!("maybe.{}.{}", self.prefix, p.name()), t.maybe()))
    }
}

fn concrete_primitives() -> impl Iterator<Item = Primitive> {
    Primitive::ALL.into_iter().filter(|p| *p != Primitive::Any)
}

/// Registers the families selected by `config` into `registry`.
///
/// # Errors
///
/// Returns an already-registered error if an identifier is taken, for
/// example when the same registry is bootstrapped twice.
pub fn bootstrap(registry: &Registry, config: &BootstrapConfig) -> Result<()> {
    let before = registry.len();

    if config.nominal {
        registry.register("any", any())?;
        for p in Primitive::ALL {
            registry.register(format!("nominal.{}", p.name()), nominal(p))?;
        }
    }

    let mut families = Vec::new();
    if config.strict {
        let family = Family::strict();
        for (p, t) in &family.types {
            registry.register(p.name(), t.clone())?;
        }
        families.push(family);
    }
    if config.coercible {
        families.push(Family::converted("coercible", COERCIBLE));
    }
    if config.params {
        families.push(Family::converted("params", PARAMS));
    }
    if config.json {
        families.push(Family::json());
    }

    for family in &families {
        for (identifier, t) in family.entries() {
            registry.register(identifier, t)?;
        }
        if config.optional {
            for (identifier, t) in family.optional_entries() {
                registry.register(identifier, t)?;
            }
        }
        if config.maybe {
            for (identifier, t) in family.maybe_entries() {
                registry.register(identifier, t)?;
            }
        }
    }

    debug!(
        families = families.len(),
        registered = registry.len() - before,
        "bootstrapped registry"
    );
    Ok(())
}

/// Creates a registry holding every built-in family.
///
/// # Errors
///
/// Does not fail in practice; registration errors are propagated.
pub fn standard_registry() -> Result<Registry> {
    let registry = Registry::new();
    bootstrap(&registry, &BootstrapConfig::default())?;
    Ok(registry)
}
