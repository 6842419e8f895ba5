//! Built-in coercion functions and registry bootstrap for Shapecast.
//!
//! This crate provides:
//! - [`coercible`] - Permissive conversions (parse strings, truncate floats, wrap scalars)
//! - [`params`] - Form-string conversions (blank strings, boolean words, decimal numbers)
//! - [`json`] - Conversions for what JSON cannot carry (dates, symbols)
//! - [`bootstrap`] - Registration of the `nominal`, `strict`, `coercible`,
//!   `params`, `json`, `optional` and `maybe` families into a [`Registry`]
//!
//! ```text
//! let registry = shapecast_stdlib::standard_registry()?;
//! registry.get("params.integer")?.call("20".into())? == 20
//! ```
//!
//! [`Registry`]: shapecast_types::Registry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bootstrap;
pub mod coercible;
pub mod config;
mod dates;
pub mod json;
pub mod params;

pub use bootstrap::{bootstrap, standard_registry};
pub use config::BootstrapConfig;
