//! Snapshot tests for column profiles.

use linelist_model::{
    CanonicalValue, CleaningConfig, ColumnSchema, ColumnSpec, DerivedColumn, ImputeConfig,
    ImputePolicy, RecodeTable, SemanticType, ValueKind,
};
use linelist_normalization::{ColumnPlan, normalize, profile_columns};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

#[test]
fn profile_after_cleaning() {
    let outcome = RecodeTable::case_insensitive(
        [("died", "died"), ("stable", "ongoing")],
        Some(CanonicalValue::from("ongoing")),
    )
    .unwrap();
    let config = CleaningConfig {
        columns: ColumnSchema::new(vec![
            ColumnSpec::new("ID", SemanticType::Text),
            ColumnSpec::new("age", SemanticType::Age),
            ColumnSpec::new(
                "outcome",
                SemanticType::Categorical {
                    recode: Some(outcome),
                },
            ),
        ])
        .unwrap(),
        derived: vec![DerivedColumn::recode(
            "died",
            "outcome",
            RecodeTable::case_insensitive([("died", 1)], Some(0.into())).unwrap(),
            ValueKind::Int,
        )],
        complete_case_columns: Vec::new(),
        impute: ImputeConfig {
            column: "age".to_string(),
            policy: ImputePolicy::Median,
        },
    };

    let raw = DataFrame::new(vec![
        Series::new("ID".into(), vec!["1", "2", "3"]).into_column(),
        Series::new("age".into(), vec!["40-49", "", "60+"]).into_column(),
        Series::new("outcome".into(), vec!["died", "stable", ""]).into_column(),
    ])
    .unwrap();

    let plan = ColumnPlan::build(&config).unwrap();
    let cleaned = normalize(&raw, &plan).unwrap();
    let profiles = profile_columns(&cleaned).unwrap();

    insta::assert_json_snapshot!(profiles, @r###"
    [
      {
        "name": "ID",
        "dtype": "text",
        "present": 3,
        "missing": 0,
        "distinct": 3
      },
      {
        "name": "age",
        "dtype": "float",
        "present": 2,
        "missing": 1,
        "distinct": 2
      },
      {
        "name": "outcome",
        "dtype": "text",
        "present": 3,
        "missing": 0,
        "distinct": 2
      },
      {
        "name": "died",
        "dtype": "int",
        "present": 3,
        "missing": 0,
        "distinct": 2
      }
    ]
    "###);
}
