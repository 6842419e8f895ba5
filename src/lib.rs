//! Shapecast - Composable runtime type coercion and validation
//!
//! This crate re-exports all layers of the Shapecast system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: shapecast_stdlib     Built-in families (strict, coercible, params, json)
//! Layer 2: shapecast_types      Type combinators, schemas, registry, AST
//! Layer 1: shapecast_logic      Predicates and rule evaluation
//! Layer 0: shapecast_foundation Core types (Value, Primitive, Outcome, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use shapecast::foundation::Value;
//! use shapecast::types::Coerce;
//!
//! let registry = shapecast::stdlib::standard_registry().unwrap();
//! let age = registry.get("params.integer").unwrap();
//! assert_eq!(age.call(Value::from("21")).unwrap(), Value::Int(21));
//! ```

pub use shapecast_foundation as foundation;
pub use shapecast_logic as logic;
pub use shapecast_stdlib as stdlib;
pub use shapecast_types as types;
