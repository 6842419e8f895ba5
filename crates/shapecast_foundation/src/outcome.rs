//! The success/failure envelope returned by every `try` operation.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::value::Value;

/// Result of attempting a type operation without raising.
///
/// `Success` always holds the fully processed value. `Failure` holds the
/// best-effort partially processed value (never the raw input once any
/// coercion has happened) together with an explanation.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The input was accepted; holds the coerced value.
    Success(Value),
    /// The input was rejected.
    Failure {
        /// Best-effort processed input.
        input: Value,
        /// Why the input was rejected.
        error: Explanation,
    },
}

/// Diagnostic payload of a [`Outcome::Failure`].
#[derive(Clone, Debug, PartialEq)]
pub enum Explanation {
    /// A single message.
    Message(String),
    /// Several alternatives that all failed (e.g. both branches of a sum).
    List(Vec<Explanation>),
    /// The element at `index` of an array failed.
    Element {
        /// Position of the failing element.
        index: usize,
        /// The element's own explanation.
        error: Box<Explanation>,
    },
    /// Per-key results of a schema or map, in schema order.
    Keys(Vec<(Value, Outcome)>),
}

impl Outcome {
    /// Creates a failure with a message explanation.
    #[must_use]
    pub fn failure(input: Value, message: impl Into<String>) -> Self {
        Self::Failure {
            input,
            error: Explanation::Message(message.into()),
        }
    }

    /// Returns true on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true on failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns the carried value (coerced on success, best-effort on failure).
    #[must_use]
    pub const fn input(&self) -> &Value {
        match self {
            Self::Success(input) | Self::Failure { input, .. } => input,
        }
    }

    /// Consumes the outcome and returns the carried value.
    #[must_use]
    pub fn into_input(self) -> Value {
        match self {
            Self::Success(input) | Self::Failure { input, .. } => input,
        }
    }

    /// Returns the explanation of a failure.
    #[must_use]
    pub const fn error(&self) -> Option<&Explanation> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Maps the value of a success, leaving failures untouched.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Value) -> Value) -> Self {
        match self {
            Self::Success(input) => Self::Success(f(input)),
            failure @ Self::Failure { .. } => failure,
        }
    }

    /// Converts the outcome into the raising style used by `call`.
    ///
    /// A failure becomes a constraint error carrying the best-effort value.
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome is a failure.
    pub fn into_result(self) -> crate::Result<Value> {
        match self {
            Self::Success(input) => Ok(input),
            Self::Failure { input, error } => Err(Error::new(ErrorKind::Constraint {
                value: input,
                explanation: error.to_string(),
            })),
        }
    }
}

impl Explanation {
    /// Creates a message explanation.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Returns the failing per-key entries of a `Keys` explanation.
    #[must_use]
    pub fn failed_keys(&self) -> Vec<&Value> {
        match self {
            Self::Keys(entries) => entries
                .iter()
                .filter(|(_, outcome)| outcome.is_failure())
                .map(|(key, _)| key)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up the outcome recorded for `key` in a `Keys` explanation.
    #[must_use]
    pub fn key(&self, key: &Value) -> Option<&Outcome> {
        match self {
            Self::Keys(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, o)| o),
            _ => None,
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Element { index, error } => write!(f, "[{index}] {error}"),
            Self::Keys(entries) => {
                let mut first = true;
                for (key, outcome) in entries {
                    if let Some(error) = outcome.error() {
                        if !first {
                            write!(f, ", ")?;
                        }
                        first = false;
                        write!(f, "{key:?}: {error}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl From<String> for Explanation {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Explanation {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}
