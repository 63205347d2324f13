//! Line-list snapshot output.
//!
//! Every run writes three files to the output directory:
//!
//! - **df**: the cleaned line list
//! - **df_complete_subset**: rows with every complete-case column present
//! - **df_imputed**: the cleaned line list with the impute column filled
//!
//! Files are written as Arrow IPC ("feather") or CSV.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{
    COMPLETE_SUBSET_STEM, IMPUTED_STEM, OutputFormat, PRIMARY_STEM, SnapshotPaths,
    ensure_output_dir, write_frame, write_snapshots,
};
