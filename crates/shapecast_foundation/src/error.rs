//! Error types for Shapecast.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! These are raised by the `call` family only; `try` operations convert
//! every recoverable kind into an [`Outcome::Failure`](crate::Outcome).

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// The main error type for Shapecast operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Prepends a path segment, creating the context if needed.
    ///
    /// Called while an error propagates outwards, so the outermost
    /// segment ends up first.
    #[must_use]
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::new)
            .path
            .insert(0, segment.into());
        self
    }

    /// Creates a coercion error.
    #[must_use]
    pub fn coercion(value: Value, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Coercion {
            value,
            message: message.into(),
        })
    }

    /// Creates a constraint error.
    #[must_use]
    pub fn constraint(value: Value, explanation: impl Into<String>) -> Self {
        Self::new(ErrorKind::Constraint {
            value,
            explanation: explanation.into(),
        })
    }

    /// Creates a schema error for a single key.
    #[must_use]
    pub fn schema(key: Value, value: Value, source: Error) -> Self {
        Self::new(ErrorKind::Schema {
            key,
            value,
            source: Box::new(source),
        })
    }

    /// Creates a missing key error.
    #[must_use]
    pub fn missing_key(key: Value) -> Self {
        Self::new(ErrorKind::MissingKey(key))
    }

    /// Creates an unknown keys error.
    #[must_use]
    pub fn unknown_keys(keys: Vec<Value>) -> Self {
        Self::new(ErrorKind::UnknownKeys(keys))
    }

    /// Wraps an error raised while building a named type from a hash.
    #[must_use]
    pub fn structure(name: impl Into<String>, source: Error) -> Self {
        Self::new(ErrorKind::Struct {
            name: name.into(),
            source: Box::new(source),
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an unknown type error.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType(name.into()))
    }

    /// Creates an already-registered error.
    #[must_use]
    pub fn already_registered(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyRegistered(name.into()))
    }

    /// Creates an unknown predicate error.
    #[must_use]
    pub fn unknown_predicate(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownPredicate(name.into()))
    }

    /// Creates an unknown function handle error.
    #[must_use]
    pub fn unknown_function(handle: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFunction(handle.into()))
    }

    /// Creates an invalid AST error.
    #[must_use]
    pub fn invalid_ast(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidAst(message.into()))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true for coercion errors.
    #[must_use]
    pub const fn is_coercion(&self) -> bool {
        matches!(self.kind, ErrorKind::Coercion { .. })
    }

    /// Returns true for constraint errors.
    #[must_use]
    pub const fn is_constraint(&self) -> bool {
        matches!(self.kind, ErrorKind::Constraint { .. })
    }

    /// Returns the value the error is about, when it carries one.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            ErrorKind::Coercion { value, .. }
            | ErrorKind::Constraint { value, .. }
            | ErrorKind::Schema { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A constructor function could not transform the input.
    #[error("cannot coerce {value:?}: {message}")]
    Coercion {
        /// The offending input.
        value: Value,
        /// Why the coercion failed.
        message: String,
    },

    /// The (possibly coerced) input failed a type or rule check.
    #[error("{value:?} violates constraints ({explanation})")]
    Constraint {
        /// The failing value, after any coercion.
        value: Value,
        /// Explanation from the failing check.
        explanation: String,
    },

    /// A schema key's value failed its key type.
    #[error("{value:?} is invalid for key {key:?}: {source}")]
    Schema {
        /// The (transformed) key name.
        key: Value,
        /// The value supplied for the key.
        value: Value,
        /// The key type's own error.
        source: Box<Error>,
    },

    /// A required key was absent and had no default.
    #[error("{0:?} is missing in hash input")]
    MissingKey(Value),

    /// A strict schema received undeclared keys.
    #[error("unexpected keys {0:?} in hash input")]
    UnknownKeys(Vec<Value>),

    /// Building a named type from a hash failed.
    #[error("[{name}] {source}")]
    Struct {
        /// The owning type name.
        name: String,
        /// The underlying failure.
        source: Box<Error>,
    },

    /// A builder received an argument it cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No type is registered under the identifier.
    #[error("type not registered: {0}")]
    UnknownType(String),

    /// A type is already registered under the identifier.
    #[error("type already registered: {0}")]
    AlreadyRegistered(String),

    /// The rule evaluator does not know the predicate.
    #[error("unknown predicate: {0}")]
    UnknownPredicate(String),

    /// No function is registered under the handle.
    #[error("function not registered: {0}")]
    UnknownFunction(String),

    /// An AST node could not be compiled.
    #[error("invalid ast: {0}")]
    InvalidAst(String),

    /// Encoding or decoding an AST failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the type being applied.
    pub type_name: Option<String>,
    /// Keys and indexes leading to the failing value, outermost first.
    pub path: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Appends a path segment.
    #[must_use]
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.type_name {
            write!(f, "in {name}")?;
        }
        if !self.path.is_empty() {
            if self.type_name.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at {}", self.path.join("."))?;
        }
        Ok(())
    }
}
