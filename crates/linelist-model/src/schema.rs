//! Column schema: semantic type and missing-value policy per column.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::date::DatePolicy;
use crate::error::{ConfigError, Result};
use crate::recode::RecodeTable;
use crate::value::ValueKind;

/// Which coordinate a column holds; decides the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateAxis {
    Latitude,
    Longitude,
}

impl CoordinateAxis {
    /// Inclusive bound on the absolute value.
    pub fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

/// Semantic type of a column and how its missing values are filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SemanticType {
    /// Free-text date parsed to a calendar date.
    Date(DatePolicy),
    /// Free-text age collapsed to a single number of years.
    Age,
    /// Strict floating point value.
    Float,
    /// Latitude or longitude.
    Coordinate { axis: CoordinateAxis },
    /// 0/1 flag; unmapped values become `missing`.
    Binary {
        #[serde(default)]
        missing: Option<i64>,
    },
    /// Free-text category, optionally recoded in place.
    Categorical {
        #[serde(default)]
        recode: Option<RecodeTable>,
    },
    /// Identifier or free text, passed through unchanged.
    Text,
}

impl SemanticType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::Age => "age",
            Self::Float => "float",
            Self::Coordinate { .. } => "coordinate",
            Self::Binary { .. } => "binary",
            Self::Categorical { .. } => "categorical",
            Self::Text => "text",
        }
    }

    /// Physical kind of the cleaned column, `None` when the column is left
    /// untouched or holds dates.
    pub fn output_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Age | Self::Float | Self::Coordinate { .. } => Some(ValueKind::Float),
            Self::Binary { .. } => Some(ValueKind::Int),
            Self::Categorical {
                recode: Some(table),
            } => Some(table.kind()),
            Self::Date(_) | Self::Categorical { recode: None } | Self::Text => None,
        }
    }
}

/// One column of the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: SemanticType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: SemanticType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered set of column specifications with unique names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct ColumnSchema {
    columns: Vec<ColumnSpec>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<ColumnSpec>> for ColumnSchema {
    type Error = ConfigError;

    fn try_from(columns: Vec<ColumnSpec>) -> Result<Self> {
        Self::new(columns)
    }
}

impl From<ColumnSchema> for Vec<ColumnSpec> {
    fn from(schema: ColumnSchema) -> Self {
        schema.columns
    }
}

impl<'a> IntoIterator for &'a ColumnSchema {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
