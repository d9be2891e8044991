//! Date display forms used across the calendar, all en-US.
//!
//! Every formatter takes the raw `start` string of an event and never fails: input that
//! doesn't parse as a date yields [`INVALID_DATE`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use tracing::warn;

pub const INVALID_DATE: &str = "Invalid Date";

const LONG_FORMAT: &str = "%A, %B %-d, %Y";
const TABULAR_FORMAT: &str = "%m/%d/%Y";
const DESCRIPTION_FORMAT: &str = "%A, %B %-d";

lazy_static! {
    static ref TRAILING_DATE_CLAUSE: Regex =
        Regex::new(r"\s+on.*?, \d{4}").expect("Failed to create date clause regex");
}

/// Parses `YYYY-MM-DD`, a local date-time (`YYYY-MM-DDTHH:MM[:SS]`) or an RFC 3339 timestamp.
/// Date-times keep the calendar date they were written in.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M"))
                .map(|date_time| date_time.date())
                .ok()
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .map(|date_time| date_time.date_naive())
                .ok()
        })
}

/// "Sunday, February 23, 2025"
pub fn long_form(date: &str) -> String {
    format_with(date, LONG_FORMAT)
}

/// "02/23/2025"
pub fn tabular_form(date: &str) -> String {
    format_with(date, TABULAR_FORMAT)
}

/// "Sunday, February 23"
pub fn description_form(date: &str) -> String {
    format_with(date, DESCRIPTION_FORMAT)
}

fn format_with(date: &str, pattern: &str) -> String {
    match parse_date(date) {
        Some(parsed) => parsed.format(pattern).to_string(),
        None => {
            warn!("Failed to parse date '{}'", date);
            INVALID_DATE.to_string()
        }
    }
}

/// Rewrites the first trailing " on <Weekday>, <Month> <Day>, <Year>" clause with the
/// description form of `start`, dropping the year.
///
/// Descriptions without such a clause, or events whose start doesn't parse, are left as is.
pub fn normalize_description(description: &str, start: &str) -> String {
    let Some(date) = parse_date(start) else {
        warn!("Keeping description as is, start date '{}' is invalid", start);
        return description.to_string();
    };

    let replacement = format!(" on {}", date.format(DESCRIPTION_FORMAT));

    TRAILING_DATE_CLAUSE
        .replace(description, NoExpand(&replacement))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_format_long_form() {
        assert_eq!(long_form("2025-02-23"), "Sunday, February 23, 2025");
        assert_eq!(long_form("2025-03-01"), "Saturday, March 1, 2025");
    }

    #[test_log::test]
    fn should_format_tabular_form() {
        assert_eq!(tabular_form("2025-02-23"), "02/23/2025");
        assert_eq!(tabular_form("2025-03-09T13:05:00"), "03/09/2025");
    }

    #[test_log::test]
    fn should_format_description_form_without_year() {
        assert_eq!(description_form("2025-02-23"), "Sunday, February 23");
        assert_eq!(description_form("2025-03-05T19:05:00-07:00"), "Wednesday, March 5");
    }

    #[test_log::test]
    fn when_date_is_invalid_should_produce_sentinel() {
        assert_eq!(long_form("not a date"), INVALID_DATE);
        assert_eq!(tabular_form(""), INVALID_DATE);
        assert_eq!(description_form("2025-02-30"), INVALID_DATE);
    }

    #[test_log::test]
    fn should_replace_trailing_date_clause() {
        let result = normalize_description(
            "Giants versus Rays at 01:05PM on Sunday, February 23rd, 2025",
            "2025-02-23",
        );

        assert_eq!(result, "Giants versus Rays at 01:05PM on Sunday, February 23");
    }

    #[test_log::test]
    fn substituted_clause_matches_the_event_date_and_has_no_year() {
        // The payload's clause is stale on purpose: the start date decides
        let result = normalize_description("Cubs game on Monday, March 3, 2025", "2025-03-04");

        assert!(result.ends_with("on Tuesday, March 4"), "{}", result);
        assert!(!result.contains("2025"), "{}", result);
    }

    #[test_log::test]
    fn when_there_is_no_clause_should_keep_description() {
        let result = normalize_description("Giants versus Cubs", "2025-03-04");

        assert_eq!(result, "Giants versus Cubs");
    }

    #[test_log::test]
    fn when_start_is_invalid_should_keep_description() {
        let description = "Giants versus Cubs on Monday, March 3, 2025";

        assert_eq!(normalize_description(description, "TBD"), description);
    }
}
