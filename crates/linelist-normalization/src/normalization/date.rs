//! Free-text date parsing.
//!
//! Line-list dates are typed by hand and come in many shapes:
//! `20.01.2020`, `2020-01-20`, `20 Jan 2020`, `January 20, 2020`,
//! `20 Jan`, `early January`, or ranges such as `18.01.2020 - 23.01.2020`.
//!
//! The raw string is scanned left to right and the first token that forms a
//! valid calendar date is selected; anything after it is ignored. Numeric
//! dates are read day-first, falling back to month-first only when the
//! day-first reading is not a real date. Month-only tokens resolve to a
//! fixed day: early = 5th, mid = 15th, late = 25th, bare month = 15th.
//! Tokens without a year take the policy's default year.

use std::sync::LazyLock;

use chrono::NaiveDate;
use linelist_model::DatePolicy;
use regex::{Captures, Regex};

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(?P<iso_y>\d{{4}})-(?P<iso_m>\d{{1,2}})-(?P<iso_d>\d{{1,2}})(?:T[\d:.]+)?\b|\b(?P<num_a>\d{{1,2}})[./-](?P<num_b>\d{{1,2}})[./-](?P<num_y>\d{{4}}|\d{{2}})\b|\b(?P<dmy_d>\d{{1,2}})(?:st|nd|rd|th)?[\s-]+(?P<dmy_m>{MONTH})\b\.?(?:,?[\s-]+(?P<dmy_y>\d{{4}})\b)?|\b(?P<mdy_m>{MONTH})\b\.?\s+(?P<mdy_d>\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(?P<mdy_y>\d{{4}})\b)?|\b(?:(?P<part>early|mid|late)[\s-]+)?(?P<mon_m>{MONTH})\b\.?(?:,?\s+(?P<mon_y>\d{{4}})\b)?"
    );
    Regex::new(&pattern).expect("invalid date token regex")
});

/// Clean one raw date value.
///
/// Returns `policy.missing` when the value is blank, has no parseable date
/// token, or its selected date falls before `policy.valid_start`.
pub fn clean_date(raw: Option<&str>, policy: &DatePolicy) -> Option<NaiveDate> {
    raw.and_then(|value| parse_date(value, policy.default_year))
        .filter(|date| *date >= policy.valid_start)
        .or(policy.missing)
}

/// Parse the first date token of a raw value, without any bound check.
pub fn parse_date(raw: &str, default_year: i32) -> Option<NaiveDate> {
    DATE_TOKEN
        .captures_iter(raw.trim())
        .find_map(|caps| token_date(&caps, default_year))
}

fn token_date(caps: &Captures<'_>, default_year: i32) -> Option<NaiveDate> {
    if let Some(year) = caps.name("iso_y") {
        return ymd(year.as_str(), number(caps, "iso_m")?, number(caps, "iso_d")?);
    }
    if let Some(first) = caps.name("num_a") {
        let first: u32 = first.as_str().parse().ok()?;
        let second = number(caps, "num_b")?;
        let year = expand_year(caps.name("num_y")?.as_str())?;
        return NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second));
    }
    if let Some(day) = caps.name("dmy_d") {
        let month = month_number(caps.name("dmy_m")?.as_str())?;
        let year = year_or(caps, "dmy_y", default_year)?;
        return NaiveDate::from_ymd_opt(year, month, day.as_str().parse().ok()?);
    }
    if let Some(month) = caps.name("mdy_m") {
        let month = month_number(month.as_str())?;
        let year = year_or(caps, "mdy_y", default_year)?;
        return NaiveDate::from_ymd_opt(year, month, number(caps, "mdy_d")?);
    }
    let month = month_number(caps.name("mon_m")?.as_str())?;
    let day = match caps.name("part").map(|part| part.as_str().to_ascii_lowercase()) {
        Some(part) if part == "early" => 5,
        Some(part) if part == "late" => 25,
        _ => 15,
    };
    NaiveDate::from_ymd_opt(year_or(caps, "mon_y", default_year)?, month, day)
}

/// Year written in `group`, or `default_year` when the token has none.
fn year_or(caps: &Captures<'_>, group: &str, default_year: i32) -> Option<i32> {
    match caps.name(group) {
        Some(year) => year.as_str().parse().ok(),
        None => Some(default_year),
    }
}

fn number(caps: &Captures<'_>, group: &str) -> Option<u32> {
    caps.name(group)?.as_str().parse().ok()
}

fn ymd(year: &str, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    MONTH_PREFIXES
        .iter()
        .position(|candidate| *candidate == prefix)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use linelist_model::{CONFIRMATION_ANCHOR, OUTBREAK_VALID_START};

    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn parse(raw: &str) -> Option<NaiveDate> {
        parse_date(raw, 2020)
    }

    #[test]
    fn numeric_dates_are_day_first() {
        assert_eq!(parse("20.01.2020"), Some(d(2020, 1, 20)));
        assert_eq!(parse("03-02-2020"), Some(d(2020, 2, 3)));
        assert_eq!(parse("03/02/2020"), Some(d(2020, 2, 3)));
        assert_eq!(parse("03.02.20"), Some(d(2020, 2, 3)));
    }

    #[test]
    fn month_first_only_when_day_first_is_impossible() {
        assert_eq!(parse("01/23/2020"), Some(d(2020, 1, 23)));
        assert_eq!(parse("32.13.2020"), None);
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse("2020-01-20"), Some(d(2020, 1, 20)));
        assert_eq!(parse("2020-01-20T00:00:00"), Some(d(2020, 1, 20)));
        assert_eq!(parse("2020-02-30"), None);
    }

    #[test]
    fn month_name_dates() {
        assert_eq!(parse("20 January 2020"), Some(d(2020, 1, 20)));
        assert_eq!(parse("20-Jan-2020"), Some(d(2020, 1, 20)));
        assert_eq!(parse("1st Feb 2020"), Some(d(2020, 2, 1)));
        assert_eq!(parse("January 20, 2020"), Some(d(2020, 1, 20)));
        assert_eq!(parse("Sept 3 2019"), Some(d(2019, 9, 3)));
    }

    #[test]
    fn day_and_month_without_year_keep_the_day() {
        assert_eq!(parse("20 January"), Some(d(2020, 1, 20)));
        assert_eq!(parse("20 Jan"), Some(d(2020, 1, 20)));
        assert_eq!(parse("January 20"), Some(d(2020, 1, 20)));
        assert_eq!(parse("Jan 20"), Some(d(2020, 1, 20)));
        assert_eq!(parse("3rd Feb"), Some(d(2020, 2, 3)));
        assert_eq!(parse("Feb 3rd, 2019"), Some(d(2019, 2, 3)));
        assert_eq!(parse_date("Jan 20", 2021), Some(d(2021, 1, 20)));
        assert_eq!(parse("31 Feb"), None);
    }

    #[test]
    fn four_digit_number_after_month_is_a_year() {
        assert_eq!(parse("January 2020"), Some(d(2020, 1, 15)));
        assert_eq!(parse("Dec 2019"), Some(d(2019, 12, 15)));
        assert_eq!(parse("20 January 2020"), Some(d(2020, 1, 20)));
    }

    #[test]
    fn month_only_dates_use_fixed_days() {
        assert_eq!(parse("early January"), Some(d(2020, 1, 5)));
        assert_eq!(parse("mid-January"), Some(d(2020, 1, 15)));
        assert_eq!(parse("late Dec 2019"), Some(d(2019, 12, 25)));
        assert_eq!(parse("January"), Some(d(2020, 1, 15)));
        assert_eq!(parse_date("early January", 2021), Some(d(2021, 1, 5)));
    }

    #[test]
    fn first_token_wins_in_ranges() {
        assert_eq!(parse("18.01.2020 - 23.01.2020"), Some(d(2020, 1, 18)));
        assert_eq!(parse("23.01.2020 - 18.01.2020"), Some(d(2020, 1, 23)));
        assert_eq!(parse("before 2020-01-20"), Some(d(2020, 1, 20)));
        assert_eq!(parse("32.01.2020 or 21.01.2020"), Some(d(2020, 1, 21)));
    }

    #[test]
    fn words_containing_month_names_are_not_months() {
        assert_eq!(parse("market exposure"), None);
        assert_eq!(parse("marching"), None);
        assert_eq!(parse("unknown"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn clean_date_applies_missing_policy() {
        let open = DatePolicy::outbreak();
        let anchored = DatePolicy::outbreak().with_missing(Some(CONFIRMATION_ANCHOR));

        assert_eq!(clean_date(Some(""), &anchored), Some(CONFIRMATION_ANCHOR));
        assert_eq!(clean_date(None, &anchored), Some(CONFIRMATION_ANCHOR));
        assert_eq!(clean_date(Some(""), &open), None);
        assert_eq!(clean_date(Some("not a date"), &open), None);
        assert_eq!(clean_date(Some("25.01.2020"), &anchored), Some(d(2020, 1, 25)));
    }

    #[test]
    fn clean_date_rejects_dates_before_valid_start() {
        let open = DatePolicy::outbreak();
        let anchored = DatePolicy::outbreak().with_missing(Some(CONFIRMATION_ANCHOR));

        assert_eq!(clean_date(Some("31.07.2019"), &open), None);
        assert_eq!(clean_date(Some("31.07.2019"), &anchored), Some(CONFIRMATION_ANCHOR));
        assert_eq!(clean_date(Some("01.08.2019"), &open), Some(OUTBREAK_VALID_START));
        // The bound applies to the selected token only.
        assert_eq!(clean_date(Some("18.01.2019 - 23.01.2020"), &open), None);
    }

    #[test]
    fn canonical_output_parses_back_to_itself() {
        let policy = DatePolicy::outbreak();
        let date = d(2020, 2, 11);
        let rendered = date.format("%Y-%m-%d").to_string();
        assert_eq!(clean_date(Some(&rendered), &policy), Some(date));
    }
}
