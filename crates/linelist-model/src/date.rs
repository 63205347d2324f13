//! Date cleaning policy.
//!
//! Configuration dates use the day-first `DD-MM-YYYY` form the line-list
//! curators use (`01-08-2019` is the first of August).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Format of dates in configuration files and CLI flags.
pub const DAY_FIRST_FORMAT: &str = "%d-%m-%Y";

/// Earliest plausible date for the 2019-nCoV outbreak.
pub const OUTBREAK_VALID_START: NaiveDate = match NaiveDate::from_ymd_opt(2019, 8, 1) {
    Some(date) => date,
    None => panic!("invalid outbreak start date"),
};

/// Imputed confirmation date used when `date_confirmation` is unusable.
pub const CONFIRMATION_ANCHOR: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid confirmation anchor"),
};

/// Year assumed for year-less dates such as "early January".
pub const DEFAULT_OUTBREAK_YEAR: i32 = 2020;

/// Parse a `DD-MM-YYYY` date.
pub fn parse_day_first(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FIRST_FORMAT).map_err(|_| {
        ConfigError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// Format a date as `DD-MM-YYYY`.
pub fn format_day_first(date: NaiveDate) -> String {
    date.format(DAY_FIRST_FORMAT).to_string()
}

/// How a date column is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePolicy {
    /// Value substituted for blank, unparseable or out-of-bound input.
    /// `None` leaves the cell absent.
    #[serde(default, with = "day_first_option")]
    pub missing: Option<NaiveDate>,
    /// Dates before this bound are treated as unparseable.
    #[serde(with = "day_first")]
    pub valid_start: NaiveDate,
    /// Year used when the raw value names no year.
    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_year() -> i32 {
    DEFAULT_OUTBREAK_YEAR
}

impl DatePolicy {
    /// Policy with no missing replacement.
    pub fn new(valid_start: NaiveDate) -> Self {
        Self {
            missing: None,
            valid_start,
            default_year: DEFAULT_OUTBREAK_YEAR,
        }
    }

    #[must_use]
    pub fn with_missing(mut self, missing: Option<NaiveDate>) -> Self {
        self.missing = missing;
        self
    }

    #[must_use]
    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    /// Outbreak dates left absent when missing.
    pub fn outbreak() -> Self {
        Self::new(OUTBREAK_VALID_START)
    }
}

mod day_first {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_day_first(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_day_first(&raw).map_err(serde::de::Error::custom)
    }
}

mod day_first_option {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&super::format_day_first(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_day_first(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
