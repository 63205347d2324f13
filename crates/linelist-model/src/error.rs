use thiserror::Error;

/// Errors raised while building or loading a cleaning configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date '{value}': expected DD-MM-YYYY")]
    InvalidDate { value: String },

    #[error("recode table mixes integer and text canonical values")]
    MixedCanonicalKinds,

    #[error("surface form '{surface}' maps to both '{first}' and '{second}'")]
    ConflictingSurfaceForm {
        surface: String,
        first: String,
        second: String,
    },

    #[error("duplicate column '{0}' in schema")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
