//! Derived column definitions.
//!
//! Each derived column names the columns it reads, so the order in which
//! columns are cleaned and derived is declared rather than implied by the
//! position of a statement in a script.

use serde::{Deserialize, Serialize};

use crate::recode::RecodeTable;
use crate::value::ValueKind;

/// How a derived column is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DeriveRule {
    /// `1 - source` for a cleaned 0/1 flag.
    Complement { source: String },
    /// Recode `source` through `table`, emitting `output` values.
    Recode {
        source: String,
        table: RecodeTable,
        output: ValueKind,
    },
    /// Whole days from `start` to `end`; negative values are kept.
    Interval { start: String, end: String },
}

impl DeriveRule {
    /// Columns that must be cleaned (or derived) before this rule runs.
    pub fn dependencies(&self) -> Vec<&str> {
        match self {
            Self::Complement { source } | Self::Recode { source, .. } => vec![source.as_str()],
            Self::Interval { start, end } => vec![start.as_str(), end.as_str()],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Complement { .. } => "complement",
            Self::Recode { .. } => "recode",
            Self::Interval { .. } => "interval",
        }
    }
}

/// A column added to the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub name: String,
    #[serde(flatten)]
    pub rule: DeriveRule,
}

impl DerivedColumn {
    pub fn new(name: impl Into<String>, rule: DeriveRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    pub fn complement(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(
            name,
            DeriveRule::Complement {
                source: source.into(),
            },
        )
    }

    pub fn recode(
        name: impl Into<String>,
        source: impl Into<String>,
        table: RecodeTable,
        output: ValueKind,
    ) -> Self {
        Self::new(
            name,
            DeriveRule::Recode {
                source: source.into(),
                table,
                output,
            },
        )
    }

    pub fn interval(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            DeriveRule::Interval {
                start: start.into(),
                end: end.into(),
            },
        )
    }

    pub fn dependencies(&self) -> Vec<&str> {
        self.rule.dependencies()
    }
}
