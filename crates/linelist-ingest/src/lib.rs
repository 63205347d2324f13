//! Line-list data ingestion.
//!
//! Loads a raw line-list export into a Polars DataFrame.
//!
//! # Features
//!
//! - **CSV Loading**: every cell is read as text so no value is coerced
//!   before cleaning; header names are trimmed and stripped of a BOM
//! - **IPC Loading**: Arrow IPC ("feather") files as written by earlier runs
//! - **Format Detection**: by file extension
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use linelist_ingest::read_table;
//!
//! let df = read_table(Path::new("data/nCoV2019.csv"))?;
//! ```

mod csv;
mod error;
mod ipc;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{normalize_header, read_csv_table};
pub use ipc::read_ipc_table;
pub use table::{InputFormat, read_table};
