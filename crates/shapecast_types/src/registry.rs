//! The type registry.
//!
//! Maps string identifiers (`"strict.integer"`, `"params.date"`, ...) to
//! types. Registration is insert-if-absent. Identifiers of the form
//! `name<member>` (or `name<key, value>` for hashes) are built on first
//! lookup from their parts and cached.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use shapecast_foundation::{Error, Result, Value};
use shapecast_logic::PredicateSet;
use tracing::debug;

use crate::reference::Reference;
use crate::ty::{Coerce, Type};

pub(crate) struct RegistryInner {
    types: RwLock<HashMap<String, Type>>,
    parametrized: RwLock<HashMap<String, Type>>,
    predicates: Arc<dyn PredicateSet>,
}

impl RegistryInner {
    pub(crate) fn get(&self, identifier: &str) -> Result<Type> {
        if let Some(ty) = self.types.read().get(identifier) {
            return Ok(ty.clone());
        }
        if let Some(ty) = self.parametrized.read().get(identifier) {
            return Ok(ty.clone());
        }

        let (base, params) =
            parse_parametrized(identifier).ok_or_else(|| Error::unknown_type(identifier))?;
        let base_type = self.get(base)?;
        let built = match split_params(params).as_slice() {
            [member] => base_type.of(self.get(member)?)?,
            [key, value] => base_type.map(self.get(key)?, self.get(value)?)?,
            _ => return Err(Error::unknown_type(identifier)),
        };

        debug!(identifier, "built parametrized type");
        Ok(self
            .parametrized
            .write()
            .entry(identifier.to_string())
            .or_insert(built)
            .clone())
    }
}

/// Splits `array<string>` into `("array", "string")`.
fn parse_parametrized(identifier: &str) -> Option<(&str, &str)> {
    let open = identifier.find('<')?;
    let body = identifier.strip_suffix('>')?;
    let base = identifier[..open].trim();
    let params = body[open + 1..].trim();
    if base.is_empty() || params.is_empty() {
        None
    } else {
        Some((base, params))
    }
}

/// Splits parameters on commas outside angle brackets.
fn split_params(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(params[start..].trim());
    parts
}

/// A shared, thread-safe type registry.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Creates an empty registry using the standard predicate set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_predicates(shapecast_logic::standard())
    }

    /// Creates an empty registry using `predicates` to compile constraints
    /// from ASTs.
    #[must_use]
    pub fn with_predicates(predicates: Arc<dyn PredicateSet>) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                types: RwLock::new(HashMap::new()),
                parametrized: RwLock::new(HashMap::new()),
                predicates,
            }),
        }
    }

    /// Returns the predicate set.
    #[must_use]
    pub fn predicates(&self) -> &Arc<dyn PredicateSet> {
        &self.inner.predicates
    }

    /// Registers `ty` under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is taken.
    pub fn register(&self, identifier: impl Into<String>, ty: Type) -> Result<()> {
        match self.inner.types.write().entry(identifier.into()) {
            Entry::Occupied(entry) => Err(Error::already_registered(entry.key())),
            Entry::Vacant(entry) => {
                debug!(identifier = %entry.key(), "registered type");
                entry.insert(ty);
                Ok(())
            }
        }
    }

    /// Returns true if `identifier` is registered directly.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.types.read().contains_key(identifier)
    }

    /// Looks up a type, building `name<member>` identifiers on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier (or one of its parts) is unknown,
    /// or if a parametrized base cannot take the given parameters.
    pub fn get(&self, identifier: &str) -> Result<Type> {
        self.inner.get(identifier)
    }

    /// Returns a type that looks `identifier` up each time it is applied.
    #[must_use]
    pub fn reference(&self, identifier: impl Into<String>) -> Type {
        Type::Reference(Reference::new(
            identifier.into(),
            Arc::downgrade(&self.inner),
        ))
    }

    /// Applies the type registered under `identifier` to `input`.
    ///
    /// # Errors
    ///
    /// Returns an unknown type error, or the type's own error wrapped in a
    /// struct error naming `identifier`.
    pub fn build(&self, identifier: &str, input: Value) -> Result<Value> {
        let ty = self.get(identifier)?;
        ty.call(input)
            .map_err(|error| Error::structure(identifier, error))
    }

    /// Returns the directly registered identifiers, sorted.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of directly registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.types.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.types.read().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.len())
            .field("parametrized", &self.inner.parametrized.read().len())
            .finish()
    }
}
