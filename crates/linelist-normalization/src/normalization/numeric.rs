//! Numeric normalization: ages, strict floats and coordinates.

use std::sync::LazyLock;

use linelist_model::CoordinateAxis;
use regex::Regex;

/// Ages above this many years are treated as data-entry errors.
pub const MAX_AGE_YEARS: f64 = 120.0;

static AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<lo>\d+(?:\.\d+)?)\s*(?:(?:-|–|to)\s*(?P<hi>\d+(?:\.\d+)?)?|(?P<plus>\+))?\s*(?P<unit>[a-z]+)?\.?$",
    )
    .expect("invalid age regex")
});

/// Collapse a free-text age to a single number of years.
///
/// Ranges give their midpoint, open ranges (`60-`, `60+`) their lower bound.
/// Month and week suffixes are converted to years.
///
/// # Examples
///
/// ```
/// use linelist_normalization::normalization::clean_age;
///
/// assert_eq!(clean_age(Some("40-49")), Some(44.5));
/// assert_eq!(clean_age(Some("80+")), Some(80.0));
/// assert_eq!(clean_age(Some("6 months")), Some(0.5));
/// assert_eq!(clean_age(Some("unknown")), None);
/// ```
pub fn clean_age(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().to_lowercase();
    let caps = AGE.captures(&value)?;

    let lo: f64 = caps.name("lo")?.as_str().parse().ok()?;
    let hi: f64 = match caps.name("hi") {
        Some(hi) => hi.as_str().parse().ok()?,
        None => lo,
    };
    if hi < lo {
        return None;
    }

    let divisor = match caps.name("unit").map(|unit| unit.as_str()) {
        None | Some("y" | "yr" | "yrs" | "year" | "years" | "yo") => 1.0,
        Some("m" | "mo" | "mos" | "month" | "months") => 12.0,
        Some("w" | "wk" | "wks" | "week" | "weeks") => 52.0,
        Some(_) => return None,
    };
    let (lo, hi) = (lo / divisor, hi / divisor);

    (hi.is_finite() && hi <= MAX_AGE_YEARS && lo >= 0.0).then_some((lo + hi) / 2.0)
}

/// Strict parse of a finite float. Surrounding whitespace is ignored.
pub fn clean_float(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// [`clean_float`] plus the latitude or longitude range check.
pub fn clean_coordinate(raw: Option<&str>, axis: CoordinateAxis) -> Option<f64> {
    clean_float(raw).filter(|value| value.abs() <= axis.limit())
}
