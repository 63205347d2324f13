//! Format detection and shape checks.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::ipc::read_ipc_table;

/// Supported raw input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    /// Arrow IPC, also known as feather.
    Ipc,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "feather" | "ipc" | "arrow" => Ok(Self::Ipc),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Load a raw line list, picking the reader from the file extension.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let format = InputFormat::from_path(path)?;
    let df = match format {
        InputFormat::Csv => read_csv_table(path)?,
        InputFormat::Ipc => read_ipc_table(path)?,
    };
    tracing::info!(
        path = %path.display(),
        format = ?format,
        rows = df.height(),
        columns = df.width(),
        "Loaded input table"
    );
    Ok(df)
}

/// Reject tables with no rows; warn about very wide ones.
pub(crate) fn validate_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "Input has more than 500 columns"
        );
    }
    Ok(())
}
