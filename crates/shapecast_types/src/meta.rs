//! Free-form type metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shapecast_foundation::Value;

/// Key marking a schema key as omittable.
pub const OMITTABLE: &str = "omittable";

/// Metadata attached to a type.
///
/// Meta never influences coercion and is ignored by type equality.
/// Entries are kept sorted so that serialized ASTs are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(BTreeMap<String, Value>);

impl Meta {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a copy with `key` set to `value`.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut entries = self.0.clone();
        entries.insert(key.into(), value.into());
        Self(entries)
    }

    /// Returns a copy with every entry of `other` merged in; `other` wins.
    #[must_use]
    pub fn merge(&self, other: &Meta) -> Self {
        let mut entries = self.0.clone();
        entries.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(entries)
    }

    /// Returns true if no metadata is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the type is marked omittable.
    #[must_use]
    pub fn is_omittable(&self) -> bool {
        self.get(OMITTABLE) == Some(&Value::Bool(true))
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
