//! Line-list field normalization.
//!
//! Turns a raw, crowd-sourced case line list into a typed dataset:
//!
//! - **normalization**: per-value cleaning functions (dates, ages, floats,
//!   coordinates, binary flags, recodes, day intervals)
//! - **plan**: the ordered list of cleaning and derivation steps, with
//!   derived-column dependencies checked up front
//! - **executor**: applies a plan column by column to a `DataFrame`
//! - **snapshot**: complete-case and imputed variants of the cleaned data
//! - **profile**: per-column missingness and cardinality
//!
//! Malformed values never fail a run; they become the column's missing
//! value. Errors are reserved for structural problems such as a derived
//! column whose source is absent.
//!
//! # Example
//!
//! ```ignore
//! use linelist_model::CleaningConfig;
//! use linelist_normalization::{ColumnPlan, normalize};
//!
//! let config = CleaningConfig::ncov2019()?;
//! let plan = ColumnPlan::build(&config)?;
//! let cleaned = normalize(&raw_df, &plan)?;
//! ```

mod error;
mod executor;
mod plan;

pub mod normalization;
pub mod profile;
pub mod snapshot;

pub use error::{NormalizationError, PlanError, Result};
pub use executor::normalize;
pub use plan::{ColumnPlan, PlanStep};
pub use profile::{ColumnProfile, profile_columns};
pub use snapshot::{Snapshots, build_snapshots, complete_cases, impute_missing};
