//! Error types for line-list ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a raw line list.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported input formats.
    #[error("unsupported input format '{extension}' for {path} (expected csv, feather, ipc or arrow)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read an Arrow IPC file.
    #[error("failed to read IPC file {path}: {message}")]
    IpcParse { path: PathBuf, message: String },

    /// Input has no rows.
    #[error("input table is empty: {path}")]
    EmptyTable { path: PathBuf },

    /// A header cell is blank after trimming.
    #[error("empty column name in {path}")]
    EmptyColumnName { path: PathBuf },

    /// Two header cells are equal after trimming.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Map an I/O error on `path`, keeping "not found" distinct.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
