//! Japanese-style display of calendar dates.
//!
//! Malformed input is not an error: it renders as [`INVALID_DATE`].

use chrono::{DateTime, Datelike, NaiveDate};

/// Text shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Year and month/day parts of a date, for two-line layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDate {
    /// Bare year numeral (e.g. `2021`).
    pub year: String,
    /// `"<month>. <day>"` without zero padding (e.g. `5. 5`).
    pub month_day: String,
}

/// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp.
fn parse_calendar_date(date_str: &str) -> Option<NaiveDate> {
    let s = date_str.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Formats a date as `"<year>年<month>月<day>日"`.
#[must_use]
pub fn format_date(date_str: &str) -> String {
    parse_calendar_date(date_str).map_or_else(
        || String::from(INVALID_DATE),
        |d| format!("{}年{}月{}日", d.year(), d.month(), d.day()),
    )
}

/// Splits a date into its year and `"<month>. <day>"` parts.
#[must_use]
pub fn split_date(date_str: &str) -> SplitDate {
    parse_calendar_date(date_str).map_or_else(
        || SplitDate {
            year: String::from(INVALID_DATE),
            month_day: String::from(INVALID_DATE),
        },
        |d| SplitDate {
            year: d.year().to_string(),
            month_day: format!("{}. {}", d.month(), d.day()),
        },
    )
}
