//! Binary flag normalization.

/// Map a yes/no style value to `1` or `0`.
///
/// Anything unrecognized, blank or absent resolves to `missing`. Passing
/// `Some(0)` makes missing and false indistinguishable, which is how the
/// 2019-nCoV flags are configured.
///
/// # Examples
///
/// ```
/// use linelist_normalization::normalization::clean_bin;
///
/// assert_eq!(clean_bin(Some("Yes"), Some(0)), Some(1));
/// assert_eq!(clean_bin(Some("maybe"), Some(0)), Some(0));
/// assert_eq!(clean_bin(Some("maybe"), None), None);
/// ```
pub fn clean_bin(raw: Option<&str>, missing: Option<i64>) -> Option<i64> {
    raw.and_then(parse_flag).or(missing)
}

fn parse_flag(raw: &str) -> Option<i64> {
    let value = raw.trim().to_lowercase();
    match value.as_str() {
        "1" | "yes" | "y" | "true" | "t" => Some(1),
        "0" | "no" | "n" | "false" | "f" => Some(0),
        _ => match value.parse::<f64>() {
            Ok(number) if number == 1.0 => Some(1),
            Ok(number) if number == 0.0 => Some(0),
            _ => None,
        },
    }
}
