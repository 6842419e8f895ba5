//! Hash schemas: declared keys, each with its own type.
//!
//! A schema resolves input in three steps:
//!
//! 1. Input keys go through the key transform (identity, symbolize, ...).
//! 2. In strict mode any undeclared key fails the whole input; otherwise
//!    undeclared keys are dropped.
//! 3. Declared keys are processed in declaration order. Present keys run
//!    their type; absent keys take their default, fail as missing when
//!    required, or are left out.
//!
//! `call` stops at the first failure. `try` records an outcome per key.

use std::sync::Arc;

use shapecast_foundation::{Error, Explanation, LtMap, Outcome, Primitive, Result, Value};

use crate::array::sorted_entries;
use crate::func::Func;
use crate::meta::Meta;
use crate::ty::{Coerce, Type};

// =============================================================================
// Options
// =============================================================================

/// Controls how a schema treats keys missing from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Do not fail on missing required keys (partial updates).
    pub skip_missing: bool,

    /// Fill in defaults for missing keys.
    pub resolve_defaults: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            skip_missing: false,
            resolve_defaults: true,
        }
    }
}

impl ApplyOptions {
    /// Options for partial input: missing keys are neither required nor
    /// defaulted.
    #[must_use]
    pub fn partial() -> Self {
        Self {
            skip_missing: true,
            resolve_defaults: false,
        }
    }

    /// Sets whether missing required keys are tolerated.
    #[must_use]
    pub const fn with_skip_missing(mut self, skip: bool) -> Self {
        self.skip_missing = skip;
        self
    }

    /// Sets whether defaults are filled in.
    #[must_use]
    pub const fn with_resolve_defaults(mut self, resolve: bool) -> Self {
        self.resolve_defaults = resolve;
        self
    }
}

// =============================================================================
// Keys
// =============================================================================

/// A declared schema key.
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    name: Value,
    ty: Type,
    required: bool,
}

impl Key {
    /// Declares a key.
    ///
    /// The key is required unless its type is omittable or has a default.
    #[must_use]
    pub fn new(name: impl Into<Value>, ty: Type) -> Self {
        let required = !ty.meta().is_omittable() && !ty.is_default();
        Self {
            name: name.into(),
            ty,
            required,
        }
    }

    /// Returns the key name.
    #[must_use]
    pub fn name(&self) -> &Value {
        &self.name
    }

    /// Returns the key type.
    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns true if the key must be present (or defaulted).
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Overrides whether the key is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns a copy with a different type, keeping the required flag.
    #[must_use]
    pub fn with_type(&self, ty: Type) -> Self {
        Self {
            name: self.name.clone(),
            ty,
            required: self.required,
        }
    }

    pub(crate) fn weakened(self) -> Self {
        Self {
            ty: self.ty.safe(),
            required: false,
            name: self.name,
        }
    }
}

impl<K: Into<Value>> From<(K, Type)> for Key {
    fn from((name, ty): (K, Type)) -> Self {
        Self::new(name, ty)
    }
}

/// Rewrites input key names before lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum KeyTransform {
    /// Keys are used as given.
    #[default]
    Identity,
    /// String keys become symbols.
    Symbolize,
    /// Symbol keys become strings.
    Stringify,
    /// Keys go through a registered function.
    Custom(Func),
}

impl KeyTransform {
    /// Transforms one key.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing custom function.
    pub fn apply(&self, key: Value) -> Result<Value> {
        match (self, key) {
            (Self::Symbolize, Value::String(name)) => Ok(Value::Symbol(name)),
            (Self::Stringify, Value::Symbol(name)) => Ok(Value::String(name)),
            (Self::Custom(func), key) => func.call(key),
            (_, key) => Ok(key),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A hash with declared keys.
#[derive(Clone, Debug)]
pub struct Schema {
    keys: Arc<[Key]>,
    strict: bool,
    always_resolve_defaults: bool,
    transform: KeyTransform,
    meta: Meta,
}

enum Missing {
    Default,
    Required,
    Omit,
}

impl Schema {
    /// Creates a permissive schema. Later keys replace earlier keys with
    /// the same name.
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys: Arc::from(Vec::new()),
            strict: false,
            always_resolve_defaults: false,
            transform: KeyTransform::Identity,
            meta: Meta::new(),
        }
        .merge(keys)
    }

    /// Returns the keys in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Looks a key up by name.
    #[must_use]
    pub fn key(&self, name: &Value) -> Option<&Key> {
        self.keys.iter().find(|k| &k.name == name)
    }

    /// Returns true if undeclared input keys are an error.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns true if defaults are filled in regardless of [`ApplyOptions`].
    #[must_use]
    pub const fn always_resolves_defaults(&self) -> bool {
        self.always_resolve_defaults
    }

    /// Returns the input key transform.
    #[must_use]
    pub fn key_transform(&self) -> &KeyTransform {
        &self.transform
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

    /// Returns a copy with the strict flag set.
    #[must_use]
    pub fn with_strict(&self, strict: bool) -> Self {
        Self {
            strict,
            ..self.clone()
        }
    }

    /// Returns a copy that fills in defaults even when asked not to.
    #[must_use]
    pub fn with_always_resolve_defaults(&self, always: bool) -> Self {
        Self {
            always_resolve_defaults: always,
            ..self.clone()
        }
    }

    /// Returns a copy with a different key transform.
    #[must_use]
    pub fn with_key_transform(&self, transform: KeyTransform) -> Self {
        Self {
            transform,
            ..self.clone()
        }
    }

    /// Merges keys by name: replaced keys keep their position, new keys
    /// are appended.
    #[must_use]
    pub fn merge(&self, keys: Vec<Key>) -> Self {
        let mut merged = self.keys.to_vec();
        for key in keys {
            match merged.iter().position(|k| k.name == key.name) {
                Some(index) => merged[index] = key,
                None => merged.push(key),
            }
        }
        Self {
            keys: merged.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with every key type mapped through `f`.
    #[must_use]
    pub fn map_key_types(&self, f: impl Fn(&Type) -> Type) -> Self {
        Self {
            keys: self.keys.iter().map(|k| k.with_type(f(&k.ty))).collect(),
            ..self.clone()
        }
    }

    fn missing(&self, key: &Key, options: ApplyOptions) -> Missing {
        if key.ty.is_default() && (options.resolve_defaults || self.always_resolve_defaults) {
            Missing::Default
        } else if key.required && !options.skip_missing {
            Missing::Required
        } else {
            Missing::Omit
        }
    }

    fn transform_keys(&self, hash: &LtMap<Value, Value>) -> Result<LtMap<Value, Value>> {
        sorted_entries(hash)
            .into_iter()
            .try_fold(LtMap::new(), |acc, (key, value)| {
                Ok(acc.insert(self.transform.apply(key)?, value))
            })
    }

    fn unknown_keys(&self, present: &LtMap<Value, Value>) -> Vec<Value> {
        let mut unknown: Vec<Value> = present
            .keys()
            .filter(|k| self.key(k).is_none())
            .cloned()
            .collect();
        unknown.sort_by_cached_key(|k| format!("{k:?}"));
        unknown
    }

    /// Resolves `input`, raising on the first failure.
    ///
    /// # Errors
    ///
    /// Returns a coercion error for non-hash input, an unknown keys error
    /// in strict mode, a schema error naming the first failing key, or a
    /// missing key error.
    pub fn apply(&self, input: Value, options: ApplyOptions) -> Result<Value> {
        let hash = match input {
            Value::Hash(hash) => hash,
            other => return Err(Error::coercion(other, "must be a hash")),
        };
        let present = self.transform_keys(&hash)?;
        if self.strict {
            let unknown = self.unknown_keys(&present);
            if !unknown.is_empty() {
                return Err(Error::unknown_keys(unknown));
            }
        }

        let mut output = LtMap::new();
        for key in self.keys.iter() {
            let value = match present.get(&key.name) {
                Some(value) => value.clone(),
                None => match self.missing(key, options) {
                    Missing::Default => Value::Undefined,
                    Missing::Required => return Err(Error::missing_key(key.name.clone())),
                    Missing::Omit => continue,
                },
            };
            let coerced = key
                .ty
                .call(value.clone())
                .map_err(|e| Error::schema(key.name.clone(), value, e))?;
            if !coerced.is_undefined() {
                output = output.insert(key.name.clone(), coerced);
            }
        }
        Ok(Value::Hash(output))
    }

    /// Resolves `input` without raising, recording an outcome per key.
    #[must_use]
    pub fn try_apply(&self, input: Value, options: ApplyOptions) -> Outcome {
        let hash = match input {
            Value::Hash(hash) => hash,
            other => return Outcome::failure(other, "must be a hash"),
        };
        let present = match self.transform_keys(&hash) {
            Ok(present) => present,
            Err(error) => return Outcome::failure(Value::Hash(hash), error.to_string()),
        };

        let mut output = LtMap::new();
        let mut results = Vec::with_capacity(self.keys.len());
        for key in self.keys.iter() {
            let outcome = match present.get(&key.name) {
                Some(value) => key.ty.try_call(value.clone()),
                None => match self.missing(key, options) {
                    Missing::Default => key.ty.try_call(Value::Undefined),
                    Missing::Required => Outcome::failure(Value::Undefined, "is missing"),
                    Missing::Omit => continue,
                },
            };
            if !outcome.input().is_undefined() {
                output = output.insert(key.name.clone(), outcome.input().clone());
            }
            results.push((key.name.clone(), outcome));
        }
        if self.strict {
            for key in self.unknown_keys(&present) {
                let value = present.get(&key).cloned().unwrap_or(Value::Undefined);
                results.push((key, Outcome::failure(value, "is not allowed")));
            }
        }

        if results.iter().any(|(_, outcome)| outcome.is_failure()) {
            Outcome::Failure {
                input: Value::Hash(output),
                error: Explanation::Keys(results),
            }
        } else {
            Outcome::Success(Value::Hash(output))
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
            && self.strict == other.strict
            && self.always_resolve_defaults == other.always_resolve_defaults
            && self.transform == other.transform
    }
}

impl Coerce for Schema {
    fn call(&self, input: Value) -> Result<Value> {
        self.apply(input, ApplyOptions::default())
    }

    fn try_call(&self, input: Value) -> Outcome {
        self.try_apply(input, ApplyOptions::default())
    }

    fn name(&self) -> String {
        let keys: Vec<String> = self
            .keys
            .iter()
            .map(|k| format!("{}: {}", k.name, k.ty.name()))
            .collect();
        format!("hash{{{}}}", keys.join(", "))
    }

    fn primitive(&self) -> Primitive {
        Primitive::Hash
    }
}
