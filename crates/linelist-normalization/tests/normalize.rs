//! Integration tests for normalizing the 2019-nCoV line list.

use linelist_common::column_text_values;
use linelist_model::{CleaningConfig, columns as c};
use linelist_normalization::{ColumnPlan, build_snapshots, normalize};
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

fn raw_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn line_list() -> DataFrame {
    raw_df(vec![
        (c::ID, vec!["1", "2", "3", "4"]),
        (c::AGE, vec!["40-49", "", "60+", "30"]),
        (c::SEX, vec!["male", "Female", "", "female"]),
        (c::COUNTRY, vec!["China", "china", "Japan", "China"]),
        (c::WUHAN_NOT_WUHAN, vec!["1", "0", "", "no"]),
        (
            c::DATE_ONSET_SYMPTOMS,
            vec!["20.01.2020", "", "25.01.2020", "01.02.2020"],
        ),
        (
            c::DATE_ADMISSION_HOSPITAL,
            vec!["22.01.2020", "", "", "late January"],
        ),
        (
            c::DATE_CONFIRMATION,
            vec!["25.01.2020", "", "23.01.2020", "31.07.2019"],
        ),
        (c::OUTCOME, vec!["died", "stable", "", "discharged"]),
        (
            c::DATE_DEATH_OR_DISCHARGE,
            vec!["05.02.2020", "", "", "10.02.2020"],
        ),
        (c::SEQUENCE_AVAILABLE, vec!["yes", "", "no", ""]),
        (c::REPORTED_MARKET_EXPOSURE, vec!["yes", "unknown", "no", ""]),
        (c::CHRONIC_DISEASE_BINARY, vec!["", "1", "no", "yes"]),
    ])
}

fn cleaned() -> DataFrame {
    let config = CleaningConfig::ncov2019().unwrap();
    let plan = ColumnPlan::build(&config).unwrap();
    normalize(&line_list(), &plan).unwrap()
}

fn cells(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    column_text_values(df, name).unwrap()
}

fn expected(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|value| value.map(String::from)).collect()
}

#[test]
fn row_count_and_column_order() {
    let raw = line_list();
    let out = cleaned();

    assert_eq!(out.height(), raw.height());

    let names: Vec<String> = out
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut want: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    want.extend(
        [
            c::WUHAN,
            c::DIED,
            c::MALE,
            c::CHINA,
            c::DAYS_ONSET_OUTCOME,
            c::DAYS_ONSET_CONFIRM,
            c::DAYS_HOSP,
            c::DAYS_ADMIN_CONFIRM,
        ]
        .map(String::from),
    );
    assert_eq!(names, want);
}

#[test]
fn cleaned_column_types() {
    let out = cleaned();
    let dtype = |name: &str| out.column(name).unwrap().dtype().clone();

    assert_eq!(dtype(c::AGE), DataType::Float64);
    assert_eq!(dtype(c::DATE_CONFIRMATION), DataType::Date);
    assert_eq!(dtype(c::WUHAN_NOT_WUHAN), DataType::Int64);
    assert_eq!(dtype(c::MALE), DataType::Float64);
    assert_eq!(dtype(c::CHINA), DataType::Int64);
    assert_eq!(dtype(c::OUTCOME), DataType::String);
    assert_eq!(dtype(c::DAYS_HOSP), DataType::Int64);
}

#[test]
fn cleaned_values() {
    let out = cleaned();

    assert_eq!(
        cells(&out, c::AGE),
        expected(&[Some("44.5"), None, Some("60"), Some("30")])
    );
    assert_eq!(
        cells(&out, c::DATE_CONFIRMATION),
        expected(&[
            Some("2020-01-25"),
            Some("2020-01-01"),
            Some("2020-01-23"),
            Some("2020-01-01"),
        ])
    );
    assert_eq!(
        cells(&out, c::DATE_ONSET_SYMPTOMS),
        expected(&[Some("2020-01-20"), None, Some("2020-01-25"), Some("2020-02-01")])
    );
    assert_eq!(
        cells(&out, c::OUTCOME),
        expected(&[
            Some("died"),
            Some("ongoing"),
            Some("ongoing"),
            Some("discharged"),
        ])
    );
    assert_eq!(
        cells(&out, c::SEQUENCE_AVAILABLE),
        expected(&[Some("1"), Some("0"), Some("0"), Some("0")])
    );
    assert_eq!(
        cells(&out, c::REPORTED_MARKET_EXPOSURE),
        expected(&[Some("1"), None, Some("0"), None])
    );
    assert_eq!(
        cells(&out, c::CHRONIC_DISEASE_BINARY),
        expected(&[Some("0"), Some("1"), Some("0"), Some("1")])
    );
}

#[test]
fn derived_flags() {
    let out = cleaned();

    assert_eq!(
        cells(&out, c::WUHAN),
        expected(&[Some("0"), Some("1"), Some("1"), Some("1")])
    );
    assert_eq!(
        cells(&out, c::DIED),
        expected(&[Some("1"), Some("0"), Some("0"), Some("0")])
    );
    assert_eq!(
        cells(&out, c::MALE),
        expected(&[Some("1"), Some("0"), None, Some("0")])
    );
    // "china" in lower case is not "China".
    assert_eq!(
        cells(&out, c::CHINA),
        expected(&[Some("1"), Some("0"), Some("0"), Some("1")])
    );
}

#[test]
fn derived_intervals() {
    let out = cleaned();

    assert_eq!(
        cells(&out, c::DAYS_ONSET_OUTCOME),
        expected(&[Some("16"), None, None, Some("9")])
    );
    assert_eq!(
        cells(&out, c::DAYS_ONSET_CONFIRM),
        expected(&[Some("5"), None, Some("-2"), Some("-31")])
    );
    assert_eq!(
        cells(&out, c::DAYS_HOSP),
        expected(&[Some("14"), None, None, Some("16")])
    );
    assert_eq!(
        cells(&out, c::DAYS_ADMIN_CONFIRM),
        expected(&[Some("3"), None, None, Some("-24")])
    );
}

#[test]
fn raw_canonical_codes_are_not_surface_forms() {
    let config = CleaningConfig::ncov2019().unwrap();
    let plan = ColumnPlan::build(&config).unwrap();
    let mut raw = line_list();
    raw.with_column(Series::new(
        c::SEQUENCE_AVAILABLE.into(),
        vec!["1", "yes", "0", "Yes"],
    ))
    .unwrap();
    raw.with_column(Series::new(
        c::REPORTED_MARKET_EXPOSURE.into(),
        vec!["0", "no", "1", "YES"],
    ))
    .unwrap();

    let out = normalize(&raw, &plan).unwrap();

    assert_eq!(
        cells(&out, c::SEQUENCE_AVAILABLE),
        expected(&[Some("0"), Some("1"), Some("0"), Some("1")])
    );
    assert_eq!(
        cells(&out, c::REPORTED_MARKET_EXPOSURE),
        expected(&[None, Some("0"), None, Some("1")])
    );
}

#[test]
fn normalizing_twice_changes_nothing() {
    let config = CleaningConfig::ncov2019().unwrap();
    let plan = ColumnPlan::build(&config).unwrap();
    let once = normalize(&line_list(), &plan).unwrap();
    let twice = normalize(&once, &plan).unwrap();
    assert!(twice.equals_missing(&once));
}

#[test]
fn snapshots_from_cleaned_frame() {
    let config = CleaningConfig::ncov2019().unwrap();
    let snapshots = build_snapshots(cleaned(), &config).unwrap();

    assert_eq!(snapshots.primary.height(), 4);
    assert_eq!(snapshots.complete_subset.height(), 2);
    assert_eq!(
        cells(&snapshots.complete_subset, c::ID),
        expected(&[Some("1"), Some("4")])
    );

    // Median of 44.5, 60 and 30.
    assert_eq!(snapshots.impute_value, Some(44.5));
    assert_eq!(
        cells(&snapshots.imputed, c::AGE),
        expected(&[Some("44.5"), Some("44.5"), Some("60"), Some("30")])
    );
    assert_eq!(snapshots.primary.column(c::AGE).unwrap().null_count(), 1);
}

#[test]
fn missing_source_column_is_an_error() {
    let config = CleaningConfig::ncov2019().unwrap();
    let plan = ColumnPlan::build(&config).unwrap();
    let raw = line_list().drop(c::OUTCOME).unwrap();

    let err = normalize(&raw, &plan).unwrap_err();
    assert_eq!(err.to_string(), "column 'outcome' not found in input");
}
