//! Polars AnyValue utility functions.
//!
//! Cleaning functions work on text, so every cell is rendered to a string
//! before it is parsed. Values that are already canonical (floats, integers,
//! dates) render to a form the cleaning functions accept again.

use chrono::{NaiveDate, TimeDelta};
use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, formats floats without trailing zeros
/// and dates as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use linelist_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(1)), "1");
/// assert_eq!(any_to_string(AnyValue::Float64(44.5)), "44.5");
/// assert_eq!(any_to_string(AnyValue::Date(18262)), "2020-01-01");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        AnyValue::Date(days) => date_from_days(days)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// True for `Null`, empty or whitespace-only strings, and NaN floats.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use linelist_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) if !v.is_nan() => Some(f64::from(v)),
        AnyValue::Float64(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

/// Render every cell of a column as text; missing cells become `None`.
pub fn column_text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx)?;
        if is_missing(&value) {
            values.push(None);
        } else {
            values.push(Some(any_to_string(value)));
        }
    }
    Ok(values)
}

fn unix_epoch() -> NaiveDate {
    // chrono's default date is 1970-01-01.
    NaiveDate::default()
}

/// Polars `Date` physical value (days since 1970-01-01) for a calendar date.
pub fn days_from_date(date: NaiveDate) -> i32 {
    (date - unix_epoch()).num_days() as i32
}

/// Calendar date for a Polars `Date` physical value.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    unix_epoch().checked_add_signed(TimeDelta::try_days(i64::from(days))?)
}
