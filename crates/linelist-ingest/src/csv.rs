//! CSV reading with every column kept as text.

use std::collections::HashSet;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::table::validate_shape;

/// Normalizes a header value by stripping a BOM and trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV file with a single header row.
///
/// No schema inference is done: every column is a string column, so values
/// such as `"40-49"` or `"01.02.2020"` reach the cleaning layer untouched.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    normalize_headers(&mut df, path)?;
    validate_shape(&df, path)?;
    Ok(df)
}

/// Renames columns whose header cell carries a BOM or padding.
fn normalize_headers(df: &mut DataFrame, path: &Path) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
        let clean = normalize_header(name);
        if clean.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
        if !seen.insert(clean.clone()) {
            return Err(IngestError::DuplicateColumn {
                column: clean,
                path: path.to_path_buf(),
            });
        }
    }

    for name in names {
        let clean = normalize_header(&name);
        if clean != name {
            tracing::debug!(from = %name, to = %clean, "Normalized header");
            df.rename(&name, clean.into())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  age  "), "age");
        assert_eq!(normalize_header("\u{feff}ID"), "ID");
        assert_eq!(normalize_header("age"), "age");
    }

    #[test]
    fn test_read_csv_table_keeps_text() {
        let file = create_temp_csv("ID,age,latitude\n1,40-49,30.59\n2,45,31.2\n");
        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    #[test]
    fn test_read_csv_table_trims_headers() {
        let file = create_temp_csv("\u{feff}ID, age ,sex\n1,30,male\n");
        let df = read_csv_table(file.path()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["ID", "age", "sex"]);
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv("ID,age\n");
        let result = read_csv_table(file.path());
        assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/nCoV2019.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
