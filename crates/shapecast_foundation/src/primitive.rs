//! Primitive runtime classes.
//!
//! A [`Primitive`] is the raw-value class a nominal type checks against.
//! It is the base case of every type tree.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Runtime class of a [`Value`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Primitive {
    /// Accepts every value, including nil.
    Any,
    /// The nil class (only value: nil).
    Nil,
    /// Booleans.
    Bool,
    /// 64-bit signed integers.
    Int,
    /// 64-bit floats.
    Float,
    /// Strings.
    String,
    /// Symbols (identifier-like names, used for symbolized hash keys).
    Symbol,
    /// Calendar dates.
    Date,
    /// Dates with a time and a UTC offset.
    DateTime,
    /// Ordered sequences.
    Array,
    /// Key/value maps.
    Hash,
}

impl Primitive {
    /// All primitives in declaration order.
    pub const ALL: [Primitive; 11] = [
        Self::Any,
        Self::Nil,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Symbol,
        Self::Date,
        Self::DateTime,
        Self::Array,
        Self::Hash,
    ];

    /// Returns true if `value` is an instance of this primitive.
    ///
    /// The undefined sentinel is never an instance of anything but `Any`.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Any, _)
                | (Self::Nil, Value::Nil)
                | (Self::Bool, Value::Bool(_))
                | (Self::Int, Value::Int(_))
                | (Self::Float, Value::Float(_))
                | (Self::String, Value::String(_))
                | (Self::Symbol, Value::Symbol(_))
                | (Self::Date, Value::Date(_))
                | (Self::DateTime, Value::DateTime(_))
                | (Self::Array, Value::Array(_))
                | (Self::Hash, Value::Hash(_))
        )
    }

    /// Returns the registry name of this primitive (`"integer"`, `"date_time"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Array => "array",
            Self::Hash => "hash",
        }
    }

    /// Looks a primitive up by its registry name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Returns true if this is the nil class.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
