//! Day intervals between two cleaned dates.

use chrono::NaiveDate;

/// Whole days from `start` to `end`.
///
/// Missing when either endpoint is missing. Negative intervals (an end
/// recorded before the start) are kept as they are.
pub fn days_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    Some((end? - start?).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2020, month, day)
    }

    #[test]
    fn whole_day_difference() {
        assert_eq!(days_between(d(1, 20), d(2, 3)), Some(14));
        assert_eq!(days_between(d(1, 20), d(1, 20)), Some(0));
    }

    #[test]
    fn negative_intervals_pass_through() {
        assert_eq!(days_between(d(2, 3), d(1, 20)), Some(-14));
    }

    #[test]
    fn missing_endpoint_gives_missing() {
        assert_eq!(days_between(None, d(1, 20)), None);
        assert_eq!(days_between(d(1, 20), None), None);
    }
}
