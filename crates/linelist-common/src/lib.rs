//! Shared utilities for line-list crates.
//!
//! Polars `AnyValue` conversions and date/day-number helpers used by the
//! normalization, ingest and output crates.

pub mod values;

pub use values::{
    any_to_f64, any_to_string, column_text_values, date_from_days, days_from_date,
    format_numeric, is_missing,
};
