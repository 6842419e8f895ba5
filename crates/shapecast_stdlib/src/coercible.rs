//! Permissive conversions behind the `coercible.*` types.
//!
//! These follow the conversion functions of dynamic languages: strings
//! are parsed, numbers widen or truncate, nil becomes the empty value of
//! collection types and scalars are wrapped into arrays.

use shapecast_foundation::{Error, LtMap, LtVec, Result, Value};

/// Converts anything printable to a string. Nil becomes `""`.
///
/// # Errors
///
/// Returns a coercion error for the undefined sentinel.
pub fn to_string(input: Value) -> Result<Value> {
    match input {
        Value::String(_) => Ok(input),
        Value::Symbol(s) => Ok(Value::String(s)),
        Value::Nil => Ok(Value::from("")),
        Value::Undefined => Err(Error::coercion(input, "cannot be coerced to a string")),
        other => Ok(Value::from(other.to_string())),
    }
}

/// Converts to an integer.
///
/// Strings may carry surrounding whitespace, a sign, `_` digit separators
/// and a `0x`, `0o` or `0b` radix prefix. Floats are truncated.
///
/// # Errors
///
/// Returns a coercion error for unparsable strings, non-finite or
/// out-of-range floats and every other class.
pub fn to_int(input: Value) -> Result<Value> {
    match &input {
        Value::Int(_) => Ok(input),
        Value::Float(f) => {
            float_to_int(*f).ok_or_else(|| Error::coercion(input.clone(), "out of integer range"))
        }
        Value::String(s) => parse_int(s, true)
            .map(Value::Int)
            .ok_or_else(|| Error::coercion(input.clone(), "invalid value for integer")),
        _ => Err(Error::coercion(input, "cannot be coerced to an integer")),
    }
}

/// Converts to a float. Integers widen; strings are parsed.
///
/// # Errors
///
/// Returns a coercion error for unparsable or non-finite strings and for
/// every other class.
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

/// Converts strings to symbols.
///
/// # Errors
///
/// Returns a coercion error for anything but strings and symbols.
pub fn to_symbol(input: Value) -> Result<Value> {
    match input {
        Value::Symbol(_) => Ok(input),
        Value::String(s) => Ok(Value::Symbol(s)),
        other => Err(Error::coercion(other, "cannot be coerced to a symbol")),
    }
}

/// Converts to an array.
///
/// Nil becomes `[]`, hashes become `[key, value]` pairs and any other
/// value is wrapped in a one-element array.
///
/// # Errors
///
/// Returns a coercion error for the undefined sentinel.
pub fn to_array(input: Value) -> Result<Value> {
    match input {
        Value::Array(_) => Ok(input),
        Value::Nil => Ok(Value::Array(LtVec::new())),
        Value::Hash(map) => Ok(Value::array_of(
            map.iter()
                .map(|(k, v)| Value::array_of([k.clone(), v.clone()])),
        )),
        Value::Undefined => Err(Error::coercion(input, "cannot be coerced to an array")),
        other => Ok(Value::array_of([other])),
    }
}

/// Converts to a hash. Nil and the empty array become `{}`.
///
/// # Errors
///
/// Returns a coercion error for every other non-hash value.
pub fn to_hash(input: Value) -> Result<Value> {
    match input {
        Value::Hash(_) => Ok(input),
        Value::Nil => Ok(Value::Hash(LtMap::new())),
        Value::Array(ref items) if items.is_empty() => Ok(Value::Hash(LtMap::new())),
        other => Err(Error::coercion(other, "cannot be coerced to a hash")),
    }
}

/// Parses an integer literal. With `radix_prefixes`, `0x`/`0o`/`0b`
/// select the base.
pub(crate) fn parse_int(input: &str, radix_prefixes: bool) -> Option<i64> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = if radix_prefixes {
        split_radix(unsigned)
    } else {
        (10, unsigned)
    };
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__");
    if !well_formed {
        return None;
    }
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

fn split_radix(digits: &str) -> (u32, &str) {
    let lower = digits.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        _ => (10, digits),
    }
}

/// Parses a finite float literal.
pub(crate) fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains("__") {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn float_to_int(f: f64) -> Option<Value> {
    let truncated = f.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(Value::Int(truncated as i64))
    } else {
        None
    }
}
