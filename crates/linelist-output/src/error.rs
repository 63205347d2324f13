//! Error types for snapshot output.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while writing snapshots.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {format} file {path}: {source}")]
    Encode {
        format: &'static str,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
