//! Error types for the normalization layer.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Problems with the declared order of cleaning and derivation steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("derived column '{column}' depends on unknown column '{dependency}'")]
    UnknownDependency { column: String, dependency: String },

    #[error("derived column '{0}' shadows a schema column")]
    ShadowedColumn(String),

    #[error("derived column '{0}' is defined more than once")]
    DuplicateDerived(String),

    #[error("derived column '{column}' emits {output} values from a table of text values")]
    IncompatibleOutput { column: String, output: &'static str },

    #[error("snapshot column '{0}' is neither a schema nor a derived column")]
    UnknownSnapshotColumn(String),

    #[error("dependency cycle among derived columns: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),
}

/// Errors that stop a normalization run.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("column '{0}' not found in input")]
    ColumnNotFound(String),

    #[error("invalid column plan: {0}")]
    Plan(#[from] PlanError),

    #[error("cannot impute column '{column}' of type {dtype}")]
    NonNumericImpute { column: String, dtype: String },

    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
