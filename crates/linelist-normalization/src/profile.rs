//! Per-column missingness and cardinality.

use std::collections::HashSet;

use linelist_common::{any_to_string, is_missing};
use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    /// `text`, `int`, `float`, `date`, `bool` or `other`.
    pub dtype: &'static str,
    pub present: usize,
    pub missing: usize,
    /// Distinct non-missing values.
    pub distinct: usize,
}

/// Profile every column of a frame, in column order.
pub fn profile_columns(df: &DataFrame) -> Result<Vec<ColumnProfile>> {
    let mut profiles = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut distinct = HashSet::new();
        let mut missing = 0usize;
        for idx in 0..column.len() {
            let value = column.get(idx)?;
            if is_missing(&value) {
                missing += 1;
            } else {
                distinct.insert(any_to_string(value));
            }
        }
        profiles.push(ColumnProfile {
            name: column.name().to_string(),
            dtype: dtype_label(column.dtype()),
            present: column.len() - missing,
            missing,
            distinct: distinct.len(),
        });
    }
    Ok(profiles)
}

fn dtype_label(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::String => "text",
        DataType::Float32 | DataType::Float64 => "float",
        dtype if dtype.is_integer() => "int",
        DataType::Date => "date",
        DataType::Boolean => "bool",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_count_as_missing() {
        let df = DataFrame::new(vec![
            Series::new("sex".into(), vec![Some("male"), Some(" "), None, Some("male")]).into_column(),
        ])
        .unwrap();
        let profile = profile_columns(&df).unwrap();
        assert_eq!(
            profile,
            vec![ColumnProfile {
                name: "sex".to_string(),
                dtype: "text",
                present: 2,
                missing: 2,
                distinct: 1,
            }]
        );
    }
}
