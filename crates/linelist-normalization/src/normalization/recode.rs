//! Categorical recoding against immutable tables.

use linelist_model::{CanonicalValue, RecodeTable};

/// Recode one value through `table`; unmatched or absent values take the
/// table's missing default.
pub fn recode_value(raw: Option<&str>, table: &RecodeTable) -> Option<CanonicalValue> {
    raw.and_then(|value| table.resolve(value))
        .or_else(|| table.missing())
        .cloned()
}

/// Like [`recode_value`] but also accepts the table's canonical values.
///
/// Only for a column that already holds the table's output type, so that
/// cleaning a cleaned column again leaves it unchanged. Raw text goes
/// through [`recode_value`].
pub fn recode_value_in_place(raw: Option<&str>, table: &RecodeTable) -> Option<CanonicalValue> {
    raw.and_then(|value| {
        table
            .resolve(value)
            .or_else(|| table.resolve_canonical(value))
    })
    .or_else(|| table.missing())
    .cloned()
}

/// Recode a sequence of values.
///
/// # Examples
///
/// ```
/// use linelist_model::{CanonicalValue, RecodeTable};
/// use linelist_normalization::normalization::recode;
///
/// let table = RecodeTable::case_insensitive(
///     [("died", "died"), ("discharged", "discharged")],
///     Some("ongoing".into()),
/// )
/// .unwrap();
/// let out = recode(["died", "discharged", "unknown_text"], &table);
/// assert_eq!(
///     out,
///     vec![
///         Some(CanonicalValue::from("died")),
///         Some(CanonicalValue::from("discharged")),
///         Some(CanonicalValue::from("ongoing")),
///     ]
/// );
/// ```
pub fn recode<'a, I, S>(values: I, table: &RecodeTable) -> Vec<Option<CanonicalValue>>
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a str>>,
{
    values
        .into_iter()
        .map(|value| recode_value(value.into(), table))
        .collect()
}
