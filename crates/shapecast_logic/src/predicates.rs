//! The predicate evaluator interface and the standard predicate set.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use regex::Regex;
use shapecast_foundation::{Error, Primitive, Result, Value};

use crate::rule::{Predicate, Rule};

/// Knows what predicates mean.
///
/// Type engines only compile constraint options through this trait and
/// ask it for verdicts; they never interpret predicate names themselves.
pub trait PredicateSet: Send + Sync + fmt::Debug {
    /// Compiles one constraint option (`min_size` => `5`) into a rule.
    ///
    /// The option name may be given with or without the trailing `?`. For
    /// predicates without arguments the option value must be `true`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown predicates or unusable arguments.
    fn compile(&self, option: &str, arg: &Value) -> Result<Rule>;

    /// Applies a compiled predicate to `input`.
    ///
    /// Arguments of the wrong shape make the predicate fail, never panic.
    fn call(&self, predicate: &Predicate, input: &Value) -> bool;
}

/// Compiles a list of constraint options into the conjunction of their rules.
///
/// # Errors
///
/// Returns an error if `options` is empty or any option fails to compile.
pub fn compile_options(set: &dyn PredicateSet, options: &[(String, Value)]) -> Result<Rule> {
    let mut rules = options.iter().map(|(name, arg)| set.compile(name, arg));
    let first = rules
        .next()
        .ok_or_else(|| Error::invalid_argument("constraint options cannot be empty"))??;
    rules.try_fold(first, |acc, rule| Ok(acc & rule?))
}

/// Predicate names and their bound-argument arity.
const STANDARD: &[(&str, usize)] = &[
    ("type?", 1),
    ("nil?", 0),
    ("filled?", 0),
    ("empty?", 0),
    ("eql?", 1),
    ("not_eql?", 1),
    ("included_in?", 1),
    ("excluded_from?", 1),
    ("gt?", 1),
    ("gteq?", 1),
    ("lt?", 1),
    ("lteq?", 1),
    ("size?", 1),
    ("min_size?", 1),
    ("max_size?", 1),
    ("format?", 1),
    ("odd?", 0),
    ("even?", 0),
    ("true?", 0),
    ("false?", 0),
    ("bool?", 0),
    ("int?", 0),
    ("str?", 0),
];

/// The built-in predicate vocabulary.
///
/// Compiled `format?` patterns are cached by source text.
#[derive(Default)]
pub struct StandardPredicates {
    patterns: RwLock<HashMap<String, Regex>>,
}

impl StandardPredicates {
    /// Creates a predicate set with an empty pattern cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the arity of a known predicate.
    #[must_use]
    pub fn arity(name: &str) -> Option<usize> {
        STANDARD
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, arity)| *arity)
    }

    fn pattern(&self, source: &str) -> Option<Regex> {
        if let Some(regex) = self.patterns.read().get(source) {
            return Some(regex.clone());
        }
        let regex = Regex::new(source).ok()?;
        self.patterns
            .write()
            .entry(source.to_string())
            .or_insert_with(|| regex.clone());
        Some(regex)
    }

    fn validate_arg(name: &str, arg: &Value) -> Result<()> {
        match name {
            "type?" => {
                let known = arg.as_str().and_then(Primitive::from_name).is_some();
                if known {
                    Ok(())
                } else {
                    Err(Error::invalid_argument(format!(
                        "type? expects a primitive name, got {arg:?}"
                    )))
                }
            }
            "format?" => match arg.as_str().map(Regex::new) {
                Some(Ok(_)) => Ok(()),
                _ => Err(Error::invalid_argument(format!(
                    "format? expects a valid pattern, got {arg:?}"
                ))),
            },
            "included_in?" | "excluded_from?" => match arg {
                Value::Array(_) => Ok(()),
                _ => Err(Error::invalid_argument(format!(
                    "{name} expects an array, got {arg:?}"
                ))),
            },
            "size?" | "min_size?" | "max_size?" => match arg {
                Value::Int(n) if *n >= 0 => Ok(()),
                _ => Err(Error::invalid_argument(format!(
                    "{name} expects a non-negative integer, got {arg:?}"
                ))),
            },
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for StandardPredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardPredicates")
            .field("cached_patterns", &self.patterns.read().len())
            .finish()
    }
}

impl PredicateSet for StandardPredicates {
    fn compile(&self, option: &str, arg: &Value) -> Result<Rule> {
        let name = if option.ends_with('?') {
            option.to_string()
        } else {
            format!("{option}?")
        };
        let arity = Self::arity(&name).ok_or_else(|| Error::unknown_predicate(&name))?;

        let args = if arity == 0 {
            if arg != &Value::Bool(true) {
                return Err(Error::invalid_argument(format!(
                    "{name} takes no argument, pass true to enable it"
                )));
            }
            Vec::new()
        } else {
            Self::validate_arg(&name, arg)?;
            vec![arg.clone()]
        };

        Ok(Rule::predicate(name, args))
    }

    fn call(&self, predicate: &Predicate, input: &Value) -> bool {
        let arg = predicate.args.first();
        match (predicate.name.as_str(), arg) {
            ("type?", Some(name)) => name
                .as_str()
                .and_then(Primitive::from_name)
                .is_some_and(|p| p.matches(input)),
            ("nil?", _) => input.is_nil(),
            ("filled?", _) => match input {
                Value::Nil | Value::Undefined => false,
                other => other.size().is_none_or(|n| n > 0),
            },
            ("empty?", _) => match input {
                Value::Nil => true,
                other => other.size() == Some(0),
            },
            ("eql?", Some(expected)) => input == expected,
            ("not_eql?", Some(expected)) => input != expected,
            ("included_in?", Some(Value::Array(list))) => list.iter().any(|v| v == input),
            ("excluded_from?", Some(Value::Array(list))) => !list.iter().any(|v| v == input),
            ("gt?", Some(bound)) => input.partial_cmp(bound).is_some_and(|o| o.is_gt()),
            ("gteq?", Some(bound)) => input.partial_cmp(bound).is_some_and(|o| o.is_ge()),
            ("lt?", Some(bound)) => input.partial_cmp(bound).is_some_and(|o| o.is_lt()),
            ("lteq?", Some(bound)) => input.partial_cmp(bound).is_some_and(|o| o.is_le()),
            ("size?", Some(Value::Int(n))) => size_is(input, |size| size == *n),
            ("min_size?", Some(Value::Int(n))) => size_is(input, |size| size >= *n),
            ("max_size?", Some(Value::Int(n))) => size_is(input, |size| size <= *n),
            ("format?", Some(Value::String(source))) => match input.as_str() {
                Some(text) => self.pattern(source).is_some_and(|re| re.is_match(text)),
                None => false,
            },
            ("odd?", _) => input.as_int().is_some_and(|n| n % 2 != 0),
            ("even?", _) => input.as_int().is_some_and(|n| n % 2 == 0),
            ("true?", _) => input == &Value::Bool(true),
            ("false?", _) => input == &Value::Bool(false),
            ("bool?", _) => matches!(input, Value::Bool(_)),
            ("int?", _) => matches!(input, Value::Int(_)),
            ("str?", _) => matches!(input, Value::String(_)),
            _ => false,
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn size_is(input: &Value, check: impl FnOnce(i64) -> bool) -> bool {
    input.size().is_some_and(|size| check(size as i64))
}
