//! Conversions behind the `json.*` types.
//!
//! JSON carries strings, numbers, booleans, arrays, objects and null
//! natively, so only the types JSON cannot express need a conversion.

use shapecast_foundation::{Error, Result, Value};

/// Maps null and the empty string to nil.
///
/// # Errors
///
/// Returns a coercion error for any other value.
pub fn to_nil(input: Value) -> Result<Value> {
    crate::params::to_nil(input)
}

/// Parses date strings.
///
/// # Errors
///
/// Returns a coercion error for unparsable strings and non-date values.
pub fn to_date(input: Value) -> Result<Value> {
    crate::dates::to_date(input)
}

/// Parses date-time strings.
///
/// # Errors
///
/// Returns a coercion error for unparsable strings and non-date values.
pub fn to_date_time(input: Value) -> Result<Value> {
    crate::dates::to_date_time(input)
}

/// Turns strings into symbols.
///
/// # Errors
///
/// Returns a coercion error for anything but strings and symbols.
pub fn to_symbol(input: Value) -> Result<Value> {
    match input {
        Value::Symbol(_) => Ok(input),
        Value::String(s) if s.is_empty() => Err(Error::coercion(
            Value::String(s),
            "an empty string is not a symbol",
        )),
        Value::String(s) => Ok(Value::Symbol(s)),
        other => Err(Error::coercion(other, "cannot be coerced to a symbol")),
    }
}
