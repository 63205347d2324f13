//! Line-list cleaning pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the raw CSV or IPC export
//! 2. **Normalize**: Clean schema columns and append derived columns
//! 3. **Snapshots**: Build the complete-case and imputed frames
//! 4. **Output**: Write the three snapshots (skipped on a dry run)

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use linelist_ingest::read_table;
use linelist_model::{CleaningConfig, ImputePolicy};
use linelist_normalization::{
    ColumnPlan, ColumnProfile, build_snapshots, normalize, profile_columns,
};
use linelist_output::{OutputFormat, SnapshotPaths, write_snapshots};

/// Options for one `clean` run.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub dry_run: bool,
}

/// Everything the summary printer needs from one `clean` run.
#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub rows: usize,
    pub complete_rows: usize,
    pub impute_column: String,
    pub impute_value: Option<f64>,
    /// Profiles of the raw input columns.
    pub before: Vec<ColumnProfile>,
    /// Profiles of the cleaned frame, derived columns included.
    pub after: Vec<ColumnProfile>,
    /// `None` on a dry run.
    pub outputs: Option<SnapshotPaths>,
}

/// Output directory used when none is given: `output/` next to the input.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}

/// Load the cleaning configuration: a JSON file, or the built-in 2019-nCoV
/// configuration. A constant imputation value overrides the configured
/// policy.
pub fn load_config(path: Option<&Path>, impute_constant: Option<f64>) -> Result<CleaningConfig> {
    let config = match path {
        Some(path) => CleaningConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CleaningConfig::ncov2019().context("build default config")?,
    };
    Ok(match impute_constant {
        Some(value) => config.with_impute_policy(ImputePolicy::Constant(value)),
        None => config,
    })
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(input: &Path) -> Result<DataFrame> {
    read_table(input).with_context(|| format!("read {}", input.display()))
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

/// Build the column plan and apply it.
pub fn clean(raw: &DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let plan = ColumnPlan::build(config).context("build column plan")?;
    normalize(raw, &plan).context("normalize line list")
}

// ============================================================================
// Stages 3 and 4: Snapshots and Output
// ============================================================================

/// Run the whole pipeline.
pub fn run_clean(options: &CleanOptions, config: &CleaningConfig) -> Result<CleanResult> {
    let span = info_span!("clean", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let raw = ingest(&options.input)?;
    let before = profile_columns(&raw).context("profile input")?;

    let cleaned = clean(&raw, config)?;
    let after = profile_columns(&cleaned).context("profile cleaned data")?;

    let snapshots = build_snapshots(cleaned, config).context("build snapshots")?;

    let outputs = if options.dry_run {
        info!("Dry run, skipping output");
        None
    } else {
        let paths = write_snapshots(&snapshots, &options.output_dir, options.format)
            .with_context(|| format!("write snapshots to {}", options.output_dir.display()))?;
        Some(paths)
    };

    info!(
        rows = snapshots.primary.height(),
        complete = snapshots.complete_subset.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Clean finished"
    );

    Ok(CleanResult {
        input: options.input.clone(),
        output_dir: options.output_dir.clone(),
        rows: snapshots.primary.height(),
        complete_rows: snapshots.complete_subset.height(),
        impute_column: config.impute.column.clone(),
        impute_value: snapshots.impute_value,
        before,
        after,
        outputs,
    })
}
