//! Array types with a member type, and hash types with key and value types.

use std::sync::Arc;

use shapecast_foundation::{Error, Explanation, LtMap, LtVec, Outcome, Primitive, Result, Value};

use crate::meta::Meta;
use crate::ty::{Coerce, Type};

/// An array whose members all go through one type.
///
/// Members that coerce to undefined are dropped from the output.
#[derive(Clone, Debug)]
pub struct ArrayType {
    member: Arc<Type>,
    meta: Meta,
}

impl ArrayType {
    /// Creates an array type.
    #[must_use]
    pub fn new(member: Type, meta: Meta) -> Self {
        Self {
            member: Arc::new(member),
            meta,
        }
    }

    /// Returns the member type.
    #[must_use]
    pub fn member(&self) -> &Type {
        &self.member
    }

    /// Returns a copy with a different member type.
    #[must_use]
    pub fn with_member(&self, member: Type) -> Self {
        Self::new(member, self.meta.clone())
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
}

impl PartialEq for ArrayType {
    fn eq(&self, other: &Self) -> bool {
        self.member == other.member
    }
}

impl Coerce for ArrayType {
    fn call(&self, input: Value) -> Result<Value> {
        let items = match input {
            Value::Array(items) => items,
            other => return Ok(other),
        };
        let mut output = LtVec::new();
        for (index, item) in items.iter().enumerate() {
            let value = self
                .member
                .call(item.clone())
                .map_err(|e| e.at(index.to_string()))?;
            if !value.is_undefined() {
                output = output.push_back(value);
            }
        }
        Ok(Value::Array(output))
    }

    fn try_call(&self, input: Value) -> Outcome {
        let items = match input {
            Value::Array(items) => items,
            other => {
                let message = format!("{other:?} must be an instance of array");
                return Outcome::failure(other, message);
            }
        };
        let mut output = LtVec::new();
        let mut first_error = None;
        for (index, item) in items.iter().enumerate() {
            let outcome = self.member.try_call(item.clone());
            if first_error.is_none() {
                if let Some(error) = outcome.error() {
                    first_error = Some(Explanation::Element {
                        index,
                        error: Box::new(error.clone()),
                    });
                }
            }
            let value = outcome.into_input();
            if !value.is_undefined() {
                output = output.push_back(value);
            }
        }
        match first_error {
            None => Outcome::Success(Value::Array(output)),
            Some(error) => Outcome::Failure {
                input: Value::Array(output),
                error,
            },
        }
    }

    fn name(&self) -> String {
        format!("array<{}>", self.member.name())
    }

    fn primitive(&self) -> Primitive {
        Primitive::Array
    }
}

/// A hash whose keys and values each go through one type.
#[derive(Clone, Debug)]
pub struct MapType {
    key_type: Arc<Type>,
    value_type: Arc<Type>,
    meta: Meta,
}

impl MapType {
    /// Creates a map type.
    #[must_use]
    pub fn new(key_type: Type, value_type: Type, meta: Meta) -> Self {
        Self {
            key_type: Arc::new(key_type),
            value_type: Arc::new(value_type),
            meta,
        }
    }

    /// Returns the key type.
    #[must_use]
    pub fn key_type(&self) -> &Type {
        &self.key_type
    }

    /// Returns the value type.
    #[must_use]
    pub fn value_type(&self) -> &Type {
        &self.value_type
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
}

impl PartialEq for MapType {
    fn eq(&self, other: &Self) -> bool {
        self.key_type == other.key_type && self.value_type == other.value_type
    }
}

/// Sorts hash entries so results do not depend on hash iteration order.
pub(crate) fn sorted_entries(hash: &LtMap<Value, Value>) -> Vec<(Value, Value)> {
    let mut entries: Vec<_> = hash.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort_by_cached_key(|(k, _)| format!("{k:?}"));
    entries
}

impl Coerce for MapType {
    fn call(&self, input: Value) -> Result<Value> {
        let hash = match input {
            Value::Hash(hash) => hash,
            other => return Err(Error::coercion(other, "must be a hash")),
        };
        let mut output = LtMap::new();
        for (key, value) in sorted_entries(&hash) {
            let new_key = self
                .key_type
                .call(key.clone())
                .map_err(|e| Error::schema(key.clone(), key.clone(), e))?;
            let new_value = self
                .value_type
                .call(value.clone())
                .map_err(|e| Error::schema(key.clone(), value, e))?;
            output = output.insert(new_key, new_value);
        }
        Ok(Value::Hash(output))
    }

    fn try_call(&self, input: Value) -> Outcome {
        let hash = match input {
            Value::Hash(hash) => hash,
            other => return Outcome::failure(other, "must be a hash"),
        };
        let mut output = LtMap::new();
        let mut results = Vec::new();
        let mut failed = false;
        for (key, value) in sorted_entries(&hash) {
            let key_outcome = self.key_type.try_call(key.clone());
            let value_outcome = self.value_type.try_call(value);
            let outcome = match (key_outcome, value_outcome) {
                (Outcome::Success(k), Outcome::Success(v)) => {
                    output = output.insert(k, v.clone());
                    Outcome::Success(v)
                }
                (Outcome::Failure { error, .. }, value_outcome) => Outcome::Failure {
                    input: value_outcome.into_input(),
                    error: Explanation::message(format!("invalid key: {error}")),
                },
                (Outcome::Success(k), failure) => {
                    output = output.insert(k, failure.input().clone());
                    failure
                }
            };
            failed |= outcome.is_failure();
            results.push((key, outcome));
        }
        if failed {
            Outcome::Failure {
                input: Value::Hash(output),
                error: Explanation::Keys(results),
            }
        } else {
            Outcome::Success(Value::Hash(output))
        }
    }

    fn name(&self) -> String {
        format!("hash<{}, {}>", self.key_type.name(), self.value_type.name())
    }

    fn primitive(&self) -> Primitive {
        Primitive::Hash
    }
}
