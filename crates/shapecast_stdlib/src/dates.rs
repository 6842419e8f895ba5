//! Date and date-time parsing shared by the `params` and `json` families.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use shapecast_foundation::{Error, Result, Value};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y", "%d %b %Y"];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parses a calendar date.
///
/// Accepts ISO 8601 dates, a few written forms, and full date-times
/// (whose time part is dropped).
pub(crate) fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| parse_date_time(input).map(|dt| dt.date_naive()))
}

/// Parses a date-time with an offset.
///
/// RFC 3339 first; date-times without an offset and bare dates are taken
/// as UTC.
pub(crate) fn parse_date_time(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
    {
        return Some(dt);
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Coerces strings to dates; dates pass, date-times lose their time.
pub(crate) fn to_date(input: Value) -> Result<Value> {
    match &input {
        Value::Date(_) => Ok(input),
        Value::DateTime(dt) => Ok(Value::Date(dt.date_naive())),
        Value::String(s) => match parse_date(s) {
            Some(date) => Ok(Value::Date(date)),
            None => Err(Error::coercion(input.clone(), "invalid date")),
        },
        _ => Err(Error::coercion(input, "cannot be coerced to a date")),
    }
}

/// Coerces strings to date-times; date-times pass, dates become midnight UTC.
pub(crate) fn to_date_time(input: Value) -> Result<Value> {
    match &input {
        Value::DateTime(_) => Ok(input),
        Value::Date(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Value::DateTime(naive.and_utc().fixed_offset()))
            .ok_or_else(|| Error::coercion(input.clone(), "invalid date")),
        Value::String(s) => match parse_date_time(s) {
            Some(dt) => Ok(Value::DateTime(dt)),
            None => Err(Error::coercion(input.clone(), "invalid date-time")),
        },
        _ => Err(Error::coercion(input, "cannot be coerced to a date-time")),
    }
}
