//! Values, primitives, result envelopes and errors for Shapecast.
//!
//! This crate provides:
//! - [`Value`] - The dynamically typed input/output of every type operation
//! - [`Primitive`] - Runtime classes nominal types check against
//! - [`Outcome`] - The success/failure envelope returned by `try`
//! - [`Error`] - Rich error types raised by `call`
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod outcome;
pub mod primitive;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use outcome::{Explanation, Outcome};
pub use primitive::Primitive;
pub use value::Value;

/// Result type for Shapecast operations.
pub type Result<T> = std::result::Result<T, Error>;
