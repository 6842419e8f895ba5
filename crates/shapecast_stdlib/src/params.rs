//! Conversions behind the `params.*` types.
//!
//! HTML forms and query strings deliver everything as strings. These
//! functions turn such strings into the values they stand for: the empty
//! string into nil (or an empty collection), boolean words into booleans,
//! decimal literals into numbers.

use shapecast_foundation::{Error, LtMap, LtVec, Result, Value};

use crate::coercible::{float_to_int, parse_float, parse_int};

/// Strings read as `true`.
pub const TRUE_VALUES: &[&str] = &[
    "1", "on", "On", "ON", "t", "true", "True", "TRUE", "T", "y", "yes", "Yes", "YES", "Y",
];

/// Strings read as `false`.
pub const FALSE_VALUES: &[&str] = &[
    "0", "off", "Off", "OFF", "f", "false", "False", "FALSE", "F", "n", "no", "No", "NO", "N",
];

fn is_empty_str(input: &Value) -> bool {
    input.as_str().is_some_and(str::is_empty)
}

/// Maps nil and the empty string to nil.
///
/// # Errors
///
/// Returns a coercion error for any other value.
pub fn to_nil(input: Value) -> Result<Value> {
    if input.is_nil() || is_empty_str(&input) {
        Ok(Value::Nil)
    } else {
        Err(Error::coercion(input, "is not nil or an empty string"))
    }
}

/// Maps boolean words (and `1`/`0`) to booleans.
///
/// # Errors
///
/// Returns a coercion error for values found in neither word list.
pub fn to_bool(input: Value) -> Result<Value> {
    let word = match &input {
        Value::Bool(_) => return Ok(input),
        Value::String(s) => s.to_string(),
        Value::Int(n) => n.to_string(),
        _ => return Err(Error::coercion(input, "cannot be coerced to a boolean")),
    };
    if TRUE_VALUES.contains(&word.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSE_VALUES.contains(&word.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(Error::coercion(input, "is not a boolean word"))
    }
}

/// Parses decimal integer strings. Floats are truncated.
///
/// # Errors
///
/// Returns a coercion error for empty or unparsable strings and for
/// non-numeric values.
pub fn to_int(input: Value) -> Result<Value> {
    match &input {
        Value::Int(_) => Ok(input),
        Value::Float(f) => {
            float_to_int(*f).ok_or_else(|| Error::coercion(input.clone(), "out of integer range"))
        }
        Value::String(s) => parse_int(s, false)
            .map(Value::Int)
            .ok_or_else(|| Error::coercion(input.clone(), "invalid value for integer")),
        _ => Err(Error::coercion(input, "cannot be coerced to an integer")),
    }
}

/// Parses float strings. Integers widen.
///
/// # Errors
///
/// Returns a coercion error for empty or unparsable strings and for
/// non-numeric values.
#[allow(clippy::cast_precision_loss)]
pub fn to_float(input: Value) -> Result<Value> {
    match &input {
        Value::Float(_) => Ok(input),
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::String(s) => parse_float(s)
            .map(Value::Float)
            .ok_or_else(|| Error::coercion(input.clone(), "invalid value for float")),
        _ => Err(Error::coercion(input, "cannot be coerced to a float")),
    }
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

/// Maps the empty string to `[]`; arrays pass.
///
/// # Errors
///
/// Returns a coercion error for any other value.
pub fn to_array(input: Value) -> Result<Value> {
    match input {
        Value::Array(_) => Ok(input),
        ref s if is_empty_str(s) => Ok(Value::Array(LtVec::new())),
        other => Err(Error::coercion(other, "cannot be coerced to an array")),
    }
}

/// Maps the empty string to `{}`; hashes pass.
///
/// # Errors
///
/// Returns a coercion error for any other value.
pub fn to_hash(input: Value) -> Result<Value> {
    match input {
        Value::Hash(_) => Ok(input),
        ref s if is_empty_str(s) => Ok(Value::Hash(LtMap::new())),
        other => Err(Error::coercion(other, "cannot be coerced to a hash")),
    }
}
