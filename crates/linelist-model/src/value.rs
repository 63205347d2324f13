//! Canonical values emitted by recode tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical categorical value.
///
/// Recode tables map raw surface forms onto one of these. Integer values are
/// used for flags (`1`/`0`), text values for controlled vocabularies such as
/// `"died"` or `"ongoing"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Int(i64),
    Text(String),
}

impl CanonicalValue {
    /// The kind of column this value belongs in.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for CanonicalValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CanonicalValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for CanonicalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Physical type of a cleaned or derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Int,
    Float,
    Text,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}
