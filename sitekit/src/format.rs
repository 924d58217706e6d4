//! Display formatting helpers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unrecognized date: {0:?}")]
    InvalidDate(String),
}

/// Render a date in the site's long French form, e.g. `5 mars 2024`.
///
/// Accepts RFC 3339 timestamps (the date is taken in the timestamp's own
/// offset), `YYYY-MM-DDTHH:MM:SS` and plain `YYYY-MM-DD`.
///
/// ```
/// use sitekit::format::format_date;
///
/// assert_eq!(format_date("2024-03-05").unwrap(), "5 mars 2024");
/// assert_eq!(format_date("2023-12-25T10:00:00+01:00").unwrap(), "25 décembre 2023");
/// assert!(format_date("yesterday").is_err());
/// ```
pub fn format_date(input: &str) -> Result<String, FormatError> {
    let input = input.trim();
    let date = DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| FormatError::InvalidDate(input.to_string()))?;

    let month = MONTHS[date.month0() as usize];
    Ok(format!("{} {} {}", date.day(), month, date.year()))
}

/// Render a number the way a style or text value expects it: no trailing
/// `.0` on whole numbers and no negative zero.
pub(crate) fn number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
