//! Lazily resolved registry references.

use std::fmt;
use std::sync::Weak;

use shapecast_foundation::{Error, Outcome, Primitive, Result, Value};

use crate::meta::Meta;
use crate::registry::RegistryInner;
use crate::ty::{Coerce, Type};

/// A named registry entry, looked up each time it is applied.
///
/// References let a schema mention a type that is registered later,
/// including itself. They hold the registry weakly, so a type stored in
/// the registry it refers to does not keep that registry alive.
#[derive(Clone)]
pub struct Reference {
    identifier: String,
    registry: Weak<RegistryInner>,
    meta: Meta,
}

impl Reference {
    pub(crate) fn new(identifier: String, registry: Weak<RegistryInner>) -> Self {
        Self {
            identifier,
            registry,
            meta: Meta::new(),
        }
    }

    /// Returns the registry identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the metadata.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Looks the referenced type up, following references registered as
    /// plain aliases of other references.
    ///
    /// # Errors
    ///
    /// Returns an error if a registry is gone, a name is unknown, or the
    /// aliases form a cycle.
    pub fn resolve(&self) -> Result<Type> {
        let mut chain = vec![self.clone()];
        let mut current = self.lookup()?;
        while let Type::Reference(next) = &current {
            if chain.iter().any(|seen| seen.same_entry(next)) {
                let names: Vec<&str> = chain.iter().map(Reference::identifier).collect();
                return Err(Error::internal(format!(
                    "reference cycle: {} -> {}",
                    names.join(" -> "),
                    next.identifier
                )));
            }
            let resolved = next.lookup()?;
            chain.push(next.clone());
            current = resolved;
        }
        Ok(current)
    }

    fn lookup(&self) -> Result<Type> {
        let registry = self.registry.upgrade().ok_or_else(|| {
            Error::internal(format!("registry holding {} was dropped", self.identifier))
        })?;
        registry.get(&self.identifier)
    }

    fn same_entry(&self, other: &Reference) -> bool {
        self.identifier == other.identifier && Weak::ptr_eq(&self.registry, &other.registry)
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reference({})", self.identifier)
    }
}

impl Coerce for Reference {
    fn call(&self, input: Value) -> Result<Value> {
        self.resolve()?.call(input)
    }

    fn try_call(&self, input: Value) -> Outcome {
        match self.resolve() {
            Ok(ty) => ty.try_call(input),
            Err(error) => Outcome::failure(input, error.to_string()),
        }
    }

    fn is_valid(&self, input: &Value) -> bool {
        self.resolve().is_ok_and(|ty| ty.is_valid(input))
    }

    fn name(&self) -> String {
        self.identifier.clone()
    }

    fn primitive(&self) -> Primitive {
        self.resolve().map_or(Primitive::Any, |ty| ty.primitive())
    }
}
