//! Cleaning configuration.
//!
//! [`CleaningConfig::ncov2019`] describes the crowd-sourced 2019-nCoV
//! individual case line list. Other line lists can supply their own
//! configuration as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::date::{CONFIRMATION_ANCHOR, DatePolicy};
use crate::derived::DerivedColumn;
use crate::error::Result;
use crate::recode::RecodeTable;
use crate::schema::{ColumnSchema, ColumnSpec, CoordinateAxis, SemanticType};
use crate::value::{CanonicalValue, ValueKind};

/// Column names of the 2019-nCoV line list.
pub mod columns {
    pub const ID: &str = "ID";
    pub const AGE: &str = "age";
    pub const SEX: &str = "sex";
    pub const CITY: &str = "city";
    pub const PROVINCE: &str = "province";
    pub const COUNTRY: &str = "country";
    pub const WUHAN_NOT_WUHAN: &str = "wuhan(0)_not_wuhan(1)";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const GEO_RESOLUTION: &str = "geo_resolution";
    pub const DATE_ONSET_SYMPTOMS: &str = "date_onset_symptoms";
    pub const DATE_ADMISSION_HOSPITAL: &str = "date_admission_hospital";
    pub const DATE_CONFIRMATION: &str = "date_confirmation";
    pub const SYMPTOMS: &str = "symptoms";
    pub const LIVES_IN_WUHAN: &str = "lives_in_Wuhan";
    pub const TRAVEL_HISTORY_DATES: &str = "travel_history_dates";
    pub const TRAVEL_HISTORY_LOCATION: &str = "travel_history_location";
    pub const REPORTED_MARKET_EXPOSURE: &str = "reported_market_exposure";
    pub const ADDITIONAL_INFORMATION: &str = "additional_information";
    pub const CHRONIC_DISEASE_BINARY: &str = "chronic_disease_binary";
    pub const CHRONIC_DISEASE: &str = "chronic_disease";
    pub const SOURCE: &str = "source";
    pub const SEQUENCE_AVAILABLE: &str = "sequence_available";
    pub const OUTCOME: &str = "outcome";
    pub const DATE_DEATH_OR_DISCHARGE: &str = "date_death_or_discharge";
    pub const NOTES_FOR_DISCUSSION: &str = "notes_for_discussion";
    pub const LOCATION: &str = "location";
    pub const ADMIN1: &str = "admin1";
    pub const ADMIN2: &str = "admin2";
    pub const ADMIN3: &str = "admin3";
    pub const ADMIN_ID: &str = "admin_id";

    pub const WUHAN: &str = "wuhan";
    pub const DIED: &str = "died";
    pub const MALE: &str = "male";
    pub const CHINA: &str = "china";
    pub const DAYS_ONSET_OUTCOME: &str = "days_onset_outcome";
    pub const DAYS_ONSET_CONFIRM: &str = "days_onset_confirm";
    pub const DAYS_HOSP: &str = "days_hosp";
    pub const DAYS_ADMIN_CONFIRM: &str = "days_admin_confirm";
}

/// How missing values of one column are imputed in the imputed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputePolicy {
    /// Median of the observed values at cleaning time.
    Median,
    /// A fixed value.
    Constant(f64),
}

/// Column and policy for the imputed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputeConfig {
    pub column: String,
    pub policy: ImputePolicy,
}

/// Everything the normalization layer needs to clean one line list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Columns to clean, in processing order.
    pub columns: ColumnSchema,
    /// Columns appended after cleaning.
    #[serde(default)]
    pub derived: Vec<DerivedColumn>,
    /// Columns that must all be present for a row to enter the complete subset.
    #[serde(default)]
    pub complete_case_columns: Vec<String>,
    pub impute: ImputeConfig,
}

impl CleaningConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_impute_policy(mut self, policy: ImputePolicy) -> Self {
        self.impute.policy = policy;
        self
    }

    /// Configuration for the 2019-nCoV individual case line list.
    pub fn ncov2019() -> Result<Self> {
        use columns as c;

        let date = DatePolicy::outbreak();
        let text = |name: &str| ColumnSpec::new(name, SemanticType::Text);
        let category = |name: &str| ColumnSpec::new(name, SemanticType::Categorical { recode: None });
        let recoded = |name: &str, table: RecodeTable| {
            ColumnSpec::new(
                name,
                SemanticType::Categorical {
                    recode: Some(table),
                },
            )
        };
        let flag = |name: &str| ColumnSpec::new(name, SemanticType::Binary { missing: Some(0) });

        let sequence_available = RecodeTable::case_insensitive([("yes", 1)], Some(0.into()))?;
        let reported_market_exposure = RecodeTable::case_insensitive(
            [
                ("yes", 1),
                ("no", 0),
                ("yes, retailer in the seafood wholesale market", 1),
                ("working in another market in Wuhan", 1),
                ("18.01.2020 - 23.01.2020", 1),
                ("18.01.2020 - 23.01.2019", 1),
            ],
            None,
        )?;
        let outcome = RecodeTable::case_insensitive(
            [
                ("died", "died"),
                ("discharged", "discharged"),
                ("stable", "ongoing"),
                (
                    "Symptoms only improved with cough. Currently hospitalized for follow-up.",
                    "ongoing",
                ),
            ],
            Some(CanonicalValue::from("ongoing")),
        )?;

        let schema = ColumnSchema::new(vec![
            text(c::ID),
            ColumnSpec::new(c::AGE, SemanticType::Age),
            text(c::SEX),
            category(c::CITY),
            category(c::PROVINCE),
            category(c::COUNTRY),
            flag(c::WUHAN_NOT_WUHAN),
            ColumnSpec::new(
                c::LATITUDE,
                SemanticType::Coordinate {
                    axis: CoordinateAxis::Latitude,
                },
            ),
            ColumnSpec::new(
                c::LONGITUDE,
                SemanticType::Coordinate {
                    axis: CoordinateAxis::Longitude,
                },
            ),
            category(c::GEO_RESOLUTION),
            ColumnSpec::new(c::DATE_ONSET_SYMPTOMS, SemanticType::Date(date)),
            ColumnSpec::new(c::DATE_ADMISSION_HOSPITAL, SemanticType::Date(date)),
            ColumnSpec::new(
                c::DATE_CONFIRMATION,
                SemanticType::Date(date.with_missing(Some(CONFIRMATION_ANCHOR))),
            ),
            text(c::SYMPTOMS),
            category(c::LIVES_IN_WUHAN),
            text(c::TRAVEL_HISTORY_DATES),
            text(c::TRAVEL_HISTORY_LOCATION),
            recoded(c::REPORTED_MARKET_EXPOSURE, reported_market_exposure),
            text(c::ADDITIONAL_INFORMATION),
            flag(c::CHRONIC_DISEASE_BINARY),
            text(c::CHRONIC_DISEASE),
            text(c::SOURCE),
            recoded(c::SEQUENCE_AVAILABLE, sequence_available),
            recoded(c::OUTCOME, outcome),
            ColumnSpec::new(c::DATE_DEATH_OR_DISCHARGE, SemanticType::Date(date)),
            text(c::NOTES_FOR_DISCUSSION),
            category(c::LOCATION),
            text(c::ADMIN3),
            text(c::ADMIN2),
            text(c::ADMIN1),
            text(c::ADMIN_ID),
        ])?;

        let derived = vec![
            DerivedColumn::complement(c::WUHAN, c::WUHAN_NOT_WUHAN),
            DerivedColumn::recode(
                c::DIED,
                c::OUTCOME,
                RecodeTable::case_insensitive([("died", 1)], Some(0.into()))?,
                ValueKind::Int,
            ),
            DerivedColumn::recode(
                c::MALE,
                c::SEX,
                RecodeTable::case_insensitive([("female", 0), ("male", 1)], None)?,
                ValueKind::Float,
            ),
            DerivedColumn::recode(
                c::CHINA,
                c::COUNTRY,
                RecodeTable::exact([("China", 1)], Some(0.into()))?,
                ValueKind::Int,
            ),
            DerivedColumn::interval(
                c::DAYS_ONSET_OUTCOME,
                c::DATE_ONSET_SYMPTOMS,
                c::DATE_DEATH_OR_DISCHARGE,
            ),
            DerivedColumn::interval(
                c::DAYS_ONSET_CONFIRM,
                c::DATE_ONSET_SYMPTOMS,
                c::DATE_CONFIRMATION,
            ),
            DerivedColumn::interval(
                c::DAYS_HOSP,
                c::DATE_ADMISSION_HOSPITAL,
                c::DATE_DEATH_OR_DISCHARGE,
            ),
            DerivedColumn::interval(
                c::DAYS_ADMIN_CONFIRM,
                c::DATE_ADMISSION_HOSPITAL,
                c::DATE_CONFIRMATION,
            ),
        ];

        Ok(Self {
            columns: schema,
            derived,
            complete_case_columns: vec![c::AGE.to_string(), c::MALE.to_string()],
            impute: ImputeConfig {
                column: c::AGE.to_string(),
                policy: ImputePolicy::Median,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::date::OUTBREAK_VALID_START;

    #[test]
    fn ncov_only_confirmation_has_a_missing_date() {
        let config = CleaningConfig::ncov2019().unwrap();
        let imputed: Vec<&str> = config
            .columns
            .iter()
            .filter_map(|spec| match &spec.kind {
                SemanticType::Date(policy) => {
                    assert_eq!(policy.valid_start, OUTBREAK_VALID_START);
                    policy.missing.map(|_| spec.name.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(imputed, vec![columns::DATE_CONFIRMATION]);
    }

    #[test]
    fn ncov_json_round_trip() {
        let config = CleaningConfig::ncov2019().unwrap();
        let json = config.to_json_pretty().unwrap();
        let back = CleaningConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_from_file() {
        let config = CleaningConfig::ncov2019()
            .unwrap()
            .with_impute_policy(ImputePolicy::Constant(50.0));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", config.to_json_pretty().unwrap()).unwrap();

        let loaded = CleaningConfig::load(file.path()).unwrap();
        assert_eq!(loaded.impute.policy, ImputePolicy::Constant(50.0));
    }

    #[test]
    fn impute_policy_json_shape() {
        assert_eq!(
            serde_json::to_string(&ImputePolicy::Median).unwrap(),
            r#""median""#
        );
        assert_eq!(
            serde_json::to_string(&ImputePolicy::Constant(50.0)).unwrap(),
            r#"{"constant":50.0}"#
        );
    }
}
