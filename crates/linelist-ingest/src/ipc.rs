//! Arrow IPC ("feather") reading.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::table::validate_shape;

/// Reads an Arrow IPC file, keeping its stored column types.
pub fn read_ipc_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let df = IpcReader::new(file)
        .finish()
        .map_err(|e| IngestError::IpcParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_shape(&df, path)?;
    Ok(df)
}
