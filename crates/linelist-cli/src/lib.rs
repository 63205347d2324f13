//! CLI library components for the line-list cleaner.

pub mod logging;
pub mod pipeline;
