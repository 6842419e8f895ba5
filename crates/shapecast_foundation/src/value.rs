//! Core value type flowing through every type operation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::collections::{LtMap, LtVec};
use crate::primitive::Primitive;

/// Dynamically typed input and output of type operations.
///
/// Values are immutable and cheaply cloneable (O(1) for every variant).
/// Arrays and hashes use structural sharing via persistent data structures.
#[derive(Clone)]
pub enum Value {
    /// The absent sentinel: "no value was supplied".
    ///
    /// Distinct from [`Value::Nil`]. Defaults fire on it, arrays drop
    /// elements that coerce to it, and it is never an instance of a
    /// primitive other than `any`.
    Undefined,
    /// The nil value.
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Symbol (identifier-like name, e.g. a symbolized hash key).
    Symbol(Arc<str>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time with a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Persistent array.
    Array(LtVec<Value>),
    /// Persistent hash.
    Hash(LtMap<Value, Value>),
}

impl Value {
    /// Creates a symbol value.
    #[must_use]
    pub fn symbol(name: impl Into<Arc<str>>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a hash value from key/value pairs.
    #[must_use]
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Hash(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Creates an array value from items.
    #[must_use]
    pub fn array_of<T, I>(items: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the primitive class of this value.
    ///
    /// The undefined sentinel reports `Any`.
    #[must_use]
    pub const fn primitive(&self) -> Primitive {
        match self {
            Self::Undefined => Primitive::Any,
            Self::Nil => Primitive::Nil,
            Self::Bool(_) => Primitive::Bool,
            Self::Int(_) => Primitive::Int,
            Self::Float(_) => Primitive::Float,
            Self::String(_) => Primitive::String,
            Self::Symbol(_) => Primitive::Symbol,
            Self::Date(_) => Primitive::Date,
            Self::DateTime(_) => Primitive::DateTime,
            Self::Array(_) => Primitive::Array,
            Self::Hash(_) => Primitive::Hash,
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value is the undefined sentinel.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if this value is nil or undefined.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Nil | Self::Undefined)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a symbol name.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a date.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Attempts to extract a date-time.
    #[must_use]
    pub const fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Attempts to extract an array reference.
    #[must_use]
    pub const fn as_array(&self) -> Option<&LtVec<Value>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a hash reference.
    #[must_use]
    pub const fn as_hash(&self) -> Option<&LtMap<Value, Value>> {
        match self {
            Self::Hash(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the size of a sized value: characters of a string or
    /// symbol, elements of an array, entries of a hash.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s.chars().count()),
            Self::Array(v) => Some(v.len()),
            Self::Hash(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Returns the textual name of a string or symbol.
    ///
    /// Used by key transforms, which treat both as names.
    #[must_use]
    pub fn name_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) | (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::String(s) | Self::Symbol(s) => s.hash(state),
            Self::Date(d) => d.hash(state),
            Self::DateTime(dt) => dt.hash(state),
            Self::Array(v) => v.hash(state),
            Self::Hash(m) => m.hash(state),
        }
    }
}

impl PartialOrd for Value {
    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Nil, Self::Nil) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            // Cross-type numeric comparison intentionally loses precision for large i64
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) | (Self::Symbol(a), Self::Symbol(b)) => {
                a.partial_cmp(b)
            }
            (Self::Date(a), Self::Date(b)) => a.partial_cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, ":{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Array(v) => write!(f, "{v:?}"),
            Self::Hash(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?} => {v:?}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Symbol(s) => write!(f, "{s}"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_possible_wrap)]
    fn from(n: usize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<LtVec<Value>> for Value {
    fn from(v: LtVec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<LtMap<Value, Value>> for Value {
    fn from(m: LtMap<Value, Value>) -> Self {
        Self::Hash(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::Value;
    use chrono::{DateTime, FixedOffset, NaiveDate};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Wire shape of a value: collections become plain sequences so the
    /// encoding does not depend on `im` internals.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Repr {
        Undefined,
        Nil,
        Bool(bool),
        Int(i64),
        Float(f64),
        String(String),
        Symbol(String),
        Date(NaiveDate),
        DateTime(DateTime<FixedOffset>),
        Array(Vec<Value>),
        Hash(Vec<(Value, Value)>),
    }

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let repr = match self {
                Self::Undefined => Repr::Undefined,
                Self::Nil => Repr::Nil,
                Self::Bool(b) => Repr::Bool(*b),
                Self::Int(n) => Repr::Int(*n),
                Self::Float(n) => Repr::Float(*n),
                Self::String(s) => Repr::String(s.to_string()),
                Self::Symbol(s) => Repr::Symbol(s.to_string()),
                Self::Date(d) => Repr::Date(*d),
                Self::DateTime(dt) => Repr::DateTime(*dt),
                Self::Array(v) => Repr::Array(v.iter().cloned().collect()),
                Self::Hash(m) => Repr::Hash(m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            };
            repr.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(match Repr::deserialize(deserializer)? {
                Repr::Undefined => Self::Undefined,
                Repr::Nil => Self::Nil,
                Repr::Bool(b) => Self::Bool(b),
                Repr::Int(n) => Self::Int(n),
                Repr::Float(n) => Self::Float(n),
                Repr::String(s) => Self::String(s.into()),
                Repr::Symbol(s) => Self::Symbol(s.into()),
                Repr::Date(d) => Self::Date(d),
                Repr::DateTime(dt) => Self::DateTime(dt),
                Repr::Array(items) => Self::Array(items.into_iter().collect()),
                Repr::Hash(pairs) => Self::Hash(pairs.into_iter().collect()),
            })
        }
    }
}
