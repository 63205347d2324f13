//! Complete-case and imputed variants of a cleaned line list.
//!
//! Each snapshot is a new frame; the primary frame is never modified.

use linelist_common::{any_to_f64, is_missing};
use linelist_model::{CleaningConfig, ImputePolicy};
use polars::prelude::*;

use crate::error::{NormalizationError, Result};

/// The three frames written for every run.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub primary: DataFrame,
    /// Rows where every complete-case column is present.
    pub complete_subset: DataFrame,
    /// Primary frame with the impute column filled.
    pub imputed: DataFrame,
    /// Value used to fill the impute column, if any was available.
    pub impute_value: Option<f64>,
}

/// Derive the complete-case and imputed snapshots from a cleaned frame.
pub fn build_snapshots(cleaned: DataFrame, config: &CleaningConfig) -> Result<Snapshots> {
    let complete_subset = complete_cases(&cleaned, &config.complete_case_columns)?;
    let (imputed, impute_value) =
        impute_missing(&cleaned, &config.impute.column, config.impute.policy)?;

    tracing::info!(
        rows = cleaned.height(),
        complete = complete_subset.height(),
        impute_value,
        "Built snapshots"
    );

    Ok(Snapshots {
        primary: cleaned,
        complete_subset,
        imputed,
        impute_value,
    })
}

/// Keep rows where every listed column is non-missing.
pub fn complete_cases(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| NormalizationError::ColumnNotFound(name.clone()))?;
        for (idx, flag) in keep.iter_mut().enumerate() {
            if *flag && is_missing(&column.get(idx)?) {
                *flag = false;
            }
        }
    }
    let mask = BooleanChunked::new("complete".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Fill the missing values of a numeric column.
///
/// Returns the new frame and the fill value. A column that is not numeric
/// is an error. Under
/// [`ImputePolicy::Median`] a column with no observed values is returned
/// unchanged with no fill value.
pub fn impute_missing(
    df: &DataFrame,
    column: &str,
    policy: ImputePolicy,
) -> Result<(DataFrame, Option<f64>)> {
    let source = df
        .column(column)
        .map_err(|_| NormalizationError::ColumnNotFound(column.to_string()))?;
    if !is_numeric(source.dtype()) {
        return Err(NormalizationError::NonNumericImpute {
            column: column.to_string(),
            dtype: source.dtype().to_string(),
        });
    }

    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(source.get(idx)?));
    }

    let fill = match policy {
        ImputePolicy::Median => median(values.iter().flatten().copied().collect()),
        ImputePolicy::Constant(value) => Some(value),
    };
    let Some(fill) = fill else {
        tracing::warn!(column, "No observed values to impute from");
        return Ok((df.clone(), None));
    };

    let missing = values.iter().filter(|value| value.is_none()).count();
    tracing::debug!(column, fill, missing, "Imputing missing values");

    let filled: Vec<f64> = values.into_iter().map(|value| value.unwrap_or(fill)).collect();
    let mut imputed = df.clone();
    imputed.with_column(Series::new(column.into(), filled))?;
    Ok((imputed, Some(fill)))
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::UInt64
            | DataType::UInt32
    )
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
