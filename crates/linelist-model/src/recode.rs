//! Recode tables: exact surface-form lookups onto a controlled vocabulary.
//!
//! A [`RecodeTable`] is an immutable value. Each column that needs recoding
//! carries its own table and its own missing default, so cleaning one column
//! can never alter the vocabulary of another.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::value::{CanonicalValue, ValueKind};

/// How raw values are compared with the table's surface forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Trim and lower-case both sides before comparing.
    #[default]
    CaseInsensitive,
    /// Trim only; the comparison is case-sensitive.
    Exact,
}

impl MatchMode {
    fn key<'a>(self, raw: &'a str) -> Cow<'a, str> {
        let trimmed = raw.trim();
        match self {
            Self::CaseInsensitive if trimmed.chars().any(char::is_uppercase) => {
                Cow::Owned(trimmed.to_lowercase())
            }
            Self::CaseInsensitive | Self::Exact => Cow::Borrowed(trimmed),
        }
    }
}

/// Mapping from raw surface forms to canonical values plus a missing default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecodeTableDef", into = "RecodeTableDef")]
pub struct RecodeTable {
    entries: BTreeMap<String, CanonicalValue>,
    match_mode: MatchMode,
    missing: Option<CanonicalValue>,
    lookup: HashMap<String, CanonicalValue>,
    canonical: HashMap<String, CanonicalValue>,
}

impl RecodeTable {
    /// Build a table, rejecting mixed canonical kinds and surface forms that
    /// collide after normalization.
    pub fn new<I, K, V>(
        match_mode: MatchMode,
        entries: I,
        missing: Option<CanonicalValue>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CanonicalValue>,
    {
        let entries: BTreeMap<String, CanonicalValue> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        let mut kinds = entries.values().chain(missing.iter()).map(CanonicalValue::kind);
        if let Some(first) = kinds.next()
            && kinds.any(|kind| kind != first)
        {
            return Err(ConfigError::MixedCanonicalKinds);
        }

        let mut lookup: HashMap<String, CanonicalValue> = HashMap::with_capacity(entries.len());
        for (surface, value) in &entries {
            let key = match_mode.key(surface).into_owned();
            if let Some(existing) = lookup.get(&key)
                && existing != value
            {
                return Err(ConfigError::ConflictingSurfaceForm {
                    surface: key,
                    first: existing.to_string(),
                    second: value.to_string(),
                });
            }
            lookup.insert(key, value.clone());
        }

        let canonical = entries
            .values()
            .chain(missing.iter())
            .map(|value| (match_mode.key(&value.to_string()).into_owned(), value.clone()))
            .collect();

        Ok(Self {
            entries,
            match_mode,
            missing,
            lookup,
            canonical,
        })
    }

    /// Case-insensitive table.
    pub fn case_insensitive<I, K, V>(entries: I, missing: Option<CanonicalValue>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CanonicalValue>,
    {
        Self::new(MatchMode::CaseInsensitive, entries, missing)
    }

    /// Case-sensitive table.
    pub fn exact<I, K, V>(entries: I, missing: Option<CanonicalValue>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CanonicalValue>,
    {
        Self::new(MatchMode::Exact, entries, missing)
    }

    /// Look up a raw value's surface form. Does not apply the missing default.
    pub fn resolve(&self, raw: &str) -> Option<&CanonicalValue> {
        self.lookup.get(self.match_mode.key(raw).as_ref())
    }

    /// Look up a raw value that is already one of this table's canonical
    /// values (including the missing default).
    pub fn resolve_canonical(&self, raw: &str) -> Option<&CanonicalValue> {
        self.canonical.get(self.match_mode.key(raw).as_ref())
    }

    pub fn missing(&self) -> Option<&CanonicalValue> {
        self.missing.as_ref()
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Surface forms as configured, in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CanonicalValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kind of the canonical values; an empty table with no default is text.
    pub fn kind(&self) -> ValueKind {
        self.entries
            .values()
            .chain(self.missing.iter())
            .next()
            .map_or(ValueKind::Text, CanonicalValue::kind)
    }
}

/// Serialized form of [`RecodeTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecodeTableDef {
    #[serde(default)]
    match_mode: MatchMode,
    entries: BTreeMap<String, CanonicalValue>,
    #[serde(default)]
    missing: Option<CanonicalValue>,
}

impl TryFrom<RecodeTableDef> for RecodeTable {
    type Error = ConfigError;

    fn try_from(def: RecodeTableDef) -> Result<Self> {
        Self::new(def.match_mode, def.entries, def.missing)
    }
}

impl From<RecodeTable> for RecodeTableDef {
    fn from(table: RecodeTable) -> Self {
        Self {
            match_mode: table.match_mode,
            entries: table.entries,
            missing: table.missing,
        }
    }
}
