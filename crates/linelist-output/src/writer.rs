//! Writing frames to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use linelist_normalization::Snapshots;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{OutputError, Result};

/// File stem of the cleaned line list.
pub const PRIMARY_STEM: &str = "df";
/// File stem of the complete-case subset.
pub const COMPLETE_SUBSET_STEM: &str = "df_complete_subset";
/// File stem of the imputed snapshot.
pub const IMPUTED_STEM: &str = "df_imputed";

/// On-disk format of the snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Arrow IPC.
    #[default]
    Feather,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Feather => "feather",
            Self::Csv => "csv",
        }
    }

    /// Path of `stem` in `dir` with this format's extension.
    pub fn file_path(self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.{}", self.extension()))
    }
}

/// Paths of the three written snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub primary: PathBuf,
    pub complete_subset: PathBuf,
    pub imputed: PathBuf,
}

impl SnapshotPaths {
    pub fn new(dir: &Path, format: OutputFormat) -> Self {
        Self {
            primary: format.file_path(dir, PRIMARY_STEM),
            complete_subset: format.file_path(dir, COMPLETE_SUBSET_STEM),
            imputed: format.file_path(dir, IMPUTED_STEM),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.primary, &self.complete_subset, &self.imputed]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Create `dir` (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write one frame. The frame is cloned because the writers need `&mut`.
pub fn write_frame(df: &DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut df = df.clone();

    let result = match format {
        OutputFormat::Feather => IpcWriter::new(&mut writer).finish(&mut df),
        OutputFormat::Csv => CsvWriter::new(&mut writer)
            .include_header(true)
            .finish(&mut df),
    };
    result.map_err(|source| OutputError::Encode {
        format: format.extension(),
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), rows = df.height(), "Wrote snapshot");
    Ok(())
}

/// Write all three snapshots into `dir`.
pub fn write_snapshots(
    snapshots: &Snapshots,
    dir: &Path,
    format: OutputFormat,
) -> Result<SnapshotPaths> {
    ensure_output_dir(dir)?;
    let paths = SnapshotPaths::new(dir, format);

    write_frame(&snapshots.primary, &paths.primary, format)?;
    write_frame(&snapshots.complete_subset, &paths.complete_subset, format)?;
    write_frame(&snapshots.imputed, &paths.imputed, format)?;

    tracing::info!(dir = %dir.display(), format = format.extension(), "Wrote snapshots");
    Ok(paths)
}
