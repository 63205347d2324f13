//! CLI argument definitions for the line-list cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "linelist",
    version,
    about = "Clean crowd-sourced case line lists into analysis-ready tables",
    long_about = "Clean a raw 2019-nCoV individual case line list.\n\n\
                  Parses free-text dates and ages, recodes categorical fields,\n\
                  derives outcome and interval columns, and writes the cleaned\n\
                  data with complete-case and imputed snapshots."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a raw line list and write the snapshots.
    Clean(CleanArgs),

    /// Show the column schema and derived columns.
    Schema(SchemaArgs),

    /// Print the built-in cleaning configuration as JSON.
    Config,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Raw line list (.csv, .feather, .ipc or .arrow).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for the snapshots (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Snapshot file format.
    #[arg(long = "format", value_enum, default_value = "feather")]
    pub format: OutputFormatArg,

    /// Cleaning configuration (JSON). Defaults to the built-in 2019-nCoV configuration.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fill missing ages with this value instead of the median.
    #[arg(long = "impute-age", value_name = "YEARS")]
    pub impute_age: Option<f64>,

    /// Clean and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Cleaning configuration (JSON). Defaults to the built-in 2019-nCoV configuration.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Feather,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
