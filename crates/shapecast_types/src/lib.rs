//! Type combinators, schemas, the type registry and the AST compiler for
//! Shapecast.
//!
//! A [`Type`] is an immutable value that coerces and validates
//! [`Value`](shapecast_foundation::Value)s. Types are built from primitives
//! with the helpers in [`builder`] and refined with combinators:
//!
//! ```text
//! nominal(p)      accepts anything, checks nothing
//! .constrained()  adds a rule checked by a PredicateSet
//! .constructor()  coerces input before the inner type sees it
//! a | b           tries a, falls back to b
//! .default(v)     fills in v for nil and missing input
//! .enumeration()  restricts to a fixed value list
//! .of(m)          arrays whose members coerce through m
//! .schema(keys)   hashes with declared keys
//! .safe() .lax() .maybe()
//! ```
//!
//! Every type answers [`Coerce::call`] (raise on failure),
//! [`Coerce::try_call`] (return an [`Outcome`](shapecast_foundation::Outcome))
//! and [`Coerce::is_valid`]. Types can be described as an [`Ast`] and
//! compiled back through a [`Registry`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod array;
pub mod ast;
pub mod builder;
pub mod compiler;
pub mod constrained;
pub mod constructor;
pub mod default;
pub mod enumeration;
pub mod func;
pub mod meta;
pub mod nominal;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod sum;
pub mod ty;
pub mod wrappers;

pub use array::{ArrayType, MapType};
pub use ast::{Ast, AstOptions, DefaultAst, KeyAst, TransformAst};
pub use compiler::Compiler;
pub use constrained::Constrained;
pub use constructor::Constructor;
pub use default::{DefaultType, DefaultValue};
pub use enumeration::Enum;
pub use func::{FnBody, Func, FunctionRegistry};
pub use meta::Meta;
pub use nominal::Nominal;
pub use reference::Reference;
pub use registry::Registry;
pub use schema::{ApplyOptions, Key, KeyTransform, Schema};
pub use sum::Sum;
pub use ty::{Coerce, Type};
pub use wrappers::{Lax, Maybe, Safe};
