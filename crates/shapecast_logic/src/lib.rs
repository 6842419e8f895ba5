//! Rule trees and the predicate evaluator interface for Shapecast.
//!
//! Constrained types own a [`Rule`] and delegate every verdict to a
//! [`PredicateSet`]. The type engine never interprets predicate names; any
//! evaluator implementing the trait can be plugged in. [`StandardPredicates`]
//! is the default vocabulary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod predicates;
pub mod rule;

use std::sync::Arc;

use once_cell::sync::Lazy;

pub use predicates::{PredicateSet, StandardPredicates, compile_options};
pub use rule::{Evaluation, Predicate, Rule};

static STANDARD: Lazy<Arc<StandardPredicates>> = Lazy::new(|| Arc::new(StandardPredicates::new()));

/// Returns the shared standard predicate set.
#[must_use]
pub fn standard() -> Arc<dyn PredicateSet> {
    STANDARD.clone()
}
