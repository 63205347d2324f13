//! Data model for line-list field normalization.
//!
//! - **schema**: semantic type and missing-value policy per column
//! - **recode**: immutable recode tables (surface form -> canonical value)
//! - **date**: date cleaning policy and day-first date literals
//! - **derived**: derived columns and their declared dependencies
//! - **config**: the complete cleaning configuration, JSON (de)serializable

pub mod config;
pub mod date;
pub mod derived;
pub mod error;
pub mod recode;
pub mod schema;
pub mod value;

pub use config::{CleaningConfig, ImputeConfig, ImputePolicy, columns};
pub use date::{
    CONFIRMATION_ANCHOR, DEFAULT_OUTBREAK_YEAR, DatePolicy, OUTBREAK_VALID_START,
    format_day_first, parse_day_first,
};
pub use derived::{DeriveRule, DerivedColumn};
pub use error::{ConfigError, Result};
pub use recode::{MatchMode, RecodeTable};
pub use schema::{ColumnSchema, ColumnSpec, CoordinateAxis, SemanticType};
pub use value::{CanonicalValue, ValueKind};
