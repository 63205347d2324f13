//! DataFrame normalization execution.
//!
//! Applies a [`ColumnPlan`] to a raw line list. Every step reads whole
//! columns as text, cleans them value by value and writes the result back
//! under the same name, so the output keeps the input's row count and
//! column order with derived columns appended.

use chrono::NaiveDate;
use linelist_common::{column_text_values, days_from_date};
use linelist_model::{
    CanonicalValue, ColumnSpec, DeriveRule, DerivedColumn, RecodeTable, SemanticType, ValueKind,
};
use polars::prelude::*;

use crate::error::{NormalizationError, Result};
use crate::normalization::{
    clean_age, clean_bin, clean_coordinate, clean_date, clean_float, days_between, recode_value,
    recode_value_in_place,
};
use crate::plan::{ColumnPlan, PlanStep};

/// Execute a plan on a source DataFrame.
///
/// Schema columns missing from the input are skipped with a warning, unless
/// a derived column or a snapshot reads them, in which case the run fails
/// before any column is touched.
pub fn normalize(source_df: &DataFrame, plan: &ColumnPlan) -> Result<DataFrame> {
    let span = tracing::info_span!("normalize", rows = source_df.height(), steps = plan.len());
    let _guard = span.enter();

    for name in plan.required_inputs() {
        if source_df.get_column_index(name).is_none() {
            return Err(NormalizationError::ColumnNotFound(name.clone()));
        }
    }

    let mut df = source_df.clone();
    let (mut cleaned, mut derived, mut skipped) = (0usize, 0usize, 0usize);

    for step in plan.steps() {
        match step {
            PlanStep::Clean(spec) => {
                if df.get_column_index(&spec.name).is_none() {
                    tracing::warn!(column = %spec.name, "Schema column not in input, skipping");
                    skipped += 1;
                    continue;
                }
                if let Some(series) = clean_column(&df, spec)? {
                    df.with_column(series)?;
                    cleaned += 1;
                }
            }
            PlanStep::Derive(column) => {
                let series = derive_column(&df, column)?;
                df.with_column(series)?;
                derived += 1;
            }
        }
    }

    tracing::info!(cleaned, derived, skipped, "Normalization complete");
    Ok(df)
}

/// Clean one schema column. Text columns are passed through (`None`).
fn clean_column(df: &DataFrame, spec: &ColumnSpec) -> Result<Option<Series>> {
    let span = tracing::debug_span!("column", name = %spec.name, kind = spec.kind.name());
    let _guard = span.enter();

    let name = spec.name.as_str();
    let series = match &spec.kind {
        SemanticType::Text | SemanticType::Categorical { recode: None } => return Ok(None),
        SemanticType::Date(policy) => {
            let values = text_values(df, name)?;
            let days: Vec<Option<i32>> = clean_values(name, &values, |raw| {
                clean_date(raw, policy).map(days_from_date)
            });
            Series::new(name.into(), days).cast(&DataType::Date)?
        }
        SemanticType::Age => {
            let values = text_values(df, name)?;
            Series::new(name.into(), clean_values(name, &values, clean_age))
        }
        SemanticType::Float => {
            let values = text_values(df, name)?;
            Series::new(name.into(), clean_values(name, &values, clean_float))
        }
        SemanticType::Coordinate { axis } => {
            let values = text_values(df, name)?;
            let cleaned = clean_values(name, &values, |raw| clean_coordinate(raw, *axis));
            Series::new(name.into(), cleaned)
        }
        SemanticType::Binary { missing } => {
            let values = text_values(df, name)?;
            Series::new(name.into(), clean_values(name, &values, |raw| clean_bin(raw, *missing)))
        }
        SemanticType::Categorical {
            recode: Some(table),
        } => {
            // Canonical values are only accepted from a column that already
            // holds the table's output type; raw text must match a surface form.
            let recoded_already = df.column(name)?.dtype() == &kind_dtype(table.kind());
            let recode: fn(Option<&str>, &RecodeTable) -> Option<CanonicalValue> =
                if recoded_already {
                    recode_value_in_place
                } else {
                    recode_value
                };
            let values = text_values(df, name)?;
            let recoded = clean_values(name, &values, |raw| recode(raw, table));
            canonical_series(name, recoded, table.kind())
        }
    };
    Ok(Some(series))
}

/// Compute one derived column from already-cleaned columns.
fn derive_column(df: &DataFrame, column: &DerivedColumn) -> Result<Series> {
    let span = tracing::debug_span!("derive", name = %column.name, rule = column.rule.name());
    let _guard = span.enter();

    let name = column.name.as_str();
    let series = match &column.rule {
        DeriveRule::Complement { source } => {
            let values = text_values(df, source)?;
            let flipped: Vec<Option<i64>> =
                clean_values(name, &values, |raw| clean_bin(raw, None).map(|flag| 1 - flag));
            Series::new(name.into(), flipped)
        }
        DeriveRule::Recode {
            source,
            table,
            output,
        } => {
            let values = text_values(df, source)?;
            let recoded = clean_values(name, &values, |raw| recode_value(raw, table));
            canonical_series(name, recoded, *output)
        }
        DeriveRule::Interval { start, end } => {
            let starts = date_values(df, start)?;
            let ends = date_values(df, end)?;
            let days: Vec<Option<i64>> = starts
                .into_iter()
                .zip(ends)
                .map(|(start, end)| days_between(start, end))
                .collect();
            let negative = days.iter().flatten().filter(|days| **days < 0).count();
            tracing::debug!(
                missing = days.iter().filter(|days| days.is_none()).count(),
                negative,
                "Derived interval"
            );
            Series::new(name.into(), days)
        }
    };
    Ok(series)
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.get_column_index(name).is_none() {
        return Err(NormalizationError::ColumnNotFound(name.to_string()));
    }
    Ok(column_text_values(df, name)?)
}

/// Cleaned dates render as `YYYY-MM-DD`, whether stored as `Date` or text.
fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    Ok(text_values(df, name)?
        .into_iter()
        .map(|value| value.and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()))
        .collect())
}

/// Map every value and log how many present values failed to clean.
fn clean_values<T>(
    column: &str,
    values: &[Option<String>],
    clean: impl Fn(Option<&str>) -> Option<T>,
) -> Vec<Option<T>> {
    let cleaned: Vec<Option<T>> = values.iter().map(|value| clean(value.as_deref())).collect();

    let mut rejected = 0usize;
    for (row, (raw, value)) in values.iter().zip(&cleaned).enumerate() {
        if let (Some(raw), None) = (raw, value) {
            rejected += 1;
            tracing::trace!(column, row, raw = %raw, "Value not recognised");
        }
    }
    tracing::debug!(
        missing_in = values.iter().filter(|value| value.is_none()).count(),
        missing_out = cleaned.iter().filter(|value| value.is_none()).count(),
        rejected,
        "Cleaned values"
    );
    cleaned
}

fn kind_dtype(kind: ValueKind) -> DataType {
    match kind {
        ValueKind::Int => DataType::Int64,
        ValueKind::Float => DataType::Float64,
        ValueKind::Text => DataType::String,
    }
}

fn canonical_series(name: &str, values: Vec<Option<CanonicalValue>>, kind: ValueKind) -> Series {
    match kind {
        ValueKind::Int => {
            let ints: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.as_ref().and_then(CanonicalValue::as_int))
                .collect();
            Series::new(name.into(), ints)
        }
        ValueKind::Float => {
            let floats: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.as_ref().and_then(CanonicalValue::as_int).map(|v| v as f64))
                .collect();
            Series::new(name.into(), floats)
        }
        ValueKind::Text => {
            let text: Vec<Option<String>> = values
                .into_iter()
                .map(|v| v.map(|v| v.to_string()))
                .collect();
            Series::new(name.into(), text)
        }
    }
}

#[cfg(test)]
mod tests {
    use linelist_model::{
        CleaningConfig, ColumnSchema, DatePolicy, ImputeConfig, ImputePolicy, RecodeTable,
    };

    use super::*;

    /// Plan that imputes the first schema column.
    fn plan(columns: Vec<ColumnSpec>, derived: Vec<DerivedColumn>) -> ColumnPlan {
        let impute = columns[0].name.clone();
        let config = CleaningConfig {
            columns: ColumnSchema::new(columns).unwrap(),
            derived,
            complete_case_columns: Vec::new(),
            impute: ImputeConfig {
                column: impute,
                policy: ImputePolicy::Median,
            },
        };
        ColumnPlan::build(&config).unwrap()
    }

    fn text_df(columns: &[(&str, &[Option<&str>])]) -> DataFrame {
        DataFrame::new(
            columns
                .iter()
                .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn text_columns_pass_through() {
        let df = text_df(&[("ID", &[Some(" 001 "), None])]);
        let plan = plan(vec![ColumnSpec::new("ID", SemanticType::Text)], vec![]);
        let out = normalize(&df, &plan).unwrap();
        assert!(out.equals_missing(&df));
    }

    #[test]
    fn dates_become_date_dtype() {
        let df = text_df(&[("onset", &[Some("20.01.2020"), Some("garbage"), None])]);
        let out = normalize(
            &df,
            &plan(
                vec![ColumnSpec::new("onset", SemanticType::Date(DatePolicy::outbreak()))],
                vec![],
            ),
        )
        .unwrap();
        let column = out.column("onset").unwrap();
        assert_eq!(column.dtype(), &DataType::Date);
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn recode_output_kinds() {
        let df = text_df(&[("sex", &[Some("Male"), Some("female"), Some("unknown")])]);
        let table = RecodeTable::case_insensitive([("female", 0), ("male", 1)], None).unwrap();
        let out = normalize(
            &df,
            &plan(
                vec![ColumnSpec::new("sex", SemanticType::Text)],
                vec![DerivedColumn::recode("male", "sex", table, ValueKind::Float)],
            ),
        )
        .unwrap();
        let male = out.column("male").unwrap();
        assert_eq!(male.dtype(), &DataType::Float64);
        assert_eq!(male.get(0).unwrap(), AnyValue::Float64(1.0));
        assert_eq!(male.get(1).unwrap(), AnyValue::Float64(0.0));
        assert_eq!(male.get(2).unwrap(), AnyValue::Null);
    }

    #[test]
    fn raw_text_must_match_a_surface_form() {
        let table = RecodeTable::case_insensitive([("yes", 1)], Some(0.into())).unwrap();
        let plan = plan(
            vec![ColumnSpec::new(
                "sequence_available",
                SemanticType::Categorical {
                    recode: Some(table),
                },
            )],
            vec![],
        );
        let df = text_df(&[("sequence_available", &[Some("yes"), Some("1"), Some("0"), None])]);

        let out = normalize(&df, &plan).unwrap();
        let cleaned = out.column("sequence_available").unwrap();
        assert_eq!(cleaned.dtype(), &DataType::Int64);
        let values: Vec<AnyValue<'_>> = (0..4).map(|idx| cleaned.get(idx).unwrap()).collect();
        assert_eq!(
            values,
            vec![
                AnyValue::Int64(1),
                AnyValue::Int64(0),
                AnyValue::Int64(0),
                AnyValue::Int64(0),
            ]
        );

        // A recoded column keeps its values when cleaned again.
        let again = normalize(&out, &plan).unwrap();
        assert!(again.equals_missing(&out));
    }

    #[test]
    fn missing_required_input_fails_before_cleaning() {
        let df = text_df(&[("other", &[Some("x")])]);
        let err = normalize(
            &df,
            &plan(
                vec![ColumnSpec::new("flag", SemanticType::Binary { missing: Some(0) })],
                vec![DerivedColumn::complement("not_flag", "flag")],
            ),
        )
        .unwrap_err();
        assert!(matches!(err, NormalizationError::ColumnNotFound(name) if name == "flag"));
    }

    #[test]
    fn absent_schema_columns_are_skipped() {
        let df = text_df(&[("ID", &[Some("1")]), ("other", &[Some("x")])]);
        let plan = plan(
            vec![
                ColumnSpec::new("ID", SemanticType::Text),
                ColumnSpec::new("latitude", SemanticType::Float),
            ],
            vec![],
        );
        let out = normalize(&df, &plan).unwrap();
        assert!(out.equals_missing(&df));
    }

    #[test]
    fn missing_snapshot_input_fails_before_cleaning() {
        let df = text_df(&[("ID", &[Some("1")]), ("sex", &[Some("male")])]);
        let plan = plan(
            vec![
                ColumnSpec::new("age", SemanticType::Age),
                ColumnSpec::new("sex", SemanticType::Text),
            ],
            vec![],
        );
        let err = normalize(&df, &plan).unwrap_err();
        assert!(matches!(err, NormalizationError::ColumnNotFound(name) if name == "age"));
    }
}
