//! Integration tests for Layer 1: Logic
//!
//! Tests for rule composition, evaluation and the standard predicate set.

mod rules;
