//! Post dates in machine-readable form. Feeds and sitemaps need full
//! ISO-8601 timestamps, while authors mostly write `YYYY-MM-DD`;
//! [`normalize`] bridges the two and rejects anything else.

use std::sync::OnceLock;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

static CALENDAR_DATE: OnceLock<Regex> = OnceLock::new();

fn calendar_date() -> &'static Regex {
    CALENDAR_DATE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

/// Converts a post date into an ISO-8601 timestamp at UTC midnight, e.g.
/// `2025-12-14` becomes `2025-12-14T00:00:00.000Z`. A date that already
/// carries a time (contains `T`) is returned unchanged.
///
/// A day past the end of its month rolls over into the next month, so
/// `2025-02-30` becomes `2025-03-02T00:00:00.000Z`.
pub fn normalize(date: &str) -> Result<String> {
    if is_timestamp(date) {
        return Ok(date.to_owned());
    }
    Ok(format(&parse_calendar_date(date)?))
}

/// Parses a post date into an instant. Accepts everything [`normalize`]
/// accepts; timestamps must be RFC 3339, or lack an offset and be read as
/// UTC.
pub fn parse_instant(date: &str) -> Result<DateTime<Utc>> {
    if !is_timestamp(date) {
        return parse_calendar_date(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(date) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::InvalidValue(date.to_owned()))
}

/// Formats an instant the way [`normalize`] does.
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn is_timestamp(date: &str) -> bool {
    date.contains('T')
}

fn parse_calendar_date(date: &str) -> Result<DateTime<Utc>> {
    if !calendar_date().is_match(date) {
        return Err(Error::InvalidFormat(date.to_owned()));
    }

    let invalid = || Error::InvalidValue(date.to_owned());
    let year: i32 = date[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = date[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = date[8..10].parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}

/// Represents the result of date normalization.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed post date. These are authoring mistakes and are
/// meant to fail the build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when the date is neither a timestamp nor `YYYY-MM-DD`.
    #[error("invalid date format: {0}, expected YYYY-MM-DD")]
    InvalidFormat(String),

    /// Returned when the date has the right shape but isn't a real date.
    #[error("invalid date value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_calendar_date() {
        assert_eq!(normalize("2025-12-14").unwrap(), "2025-12-14T00:00:00.000Z");
        assert_eq!(normalize("2024-02-29").unwrap(), "2024-02-29T00:00:00.000Z");
    }

    #[test]
    fn test_normalize_passes_timestamps_through() {
        assert_eq!(
            normalize("2025-12-14T08:30:00+02:00").unwrap(),
            "2025-12-14T08:30:00+02:00"
        );
    }

    #[test]
    fn test_normalize_invalid_format() {
        for input in &["not-a-date", "2025/12/14", "25-12-14", "2025-1-5", "", " 2025-12-14"] {
            assert_eq!(
                normalize(input),
                Err(Error::InvalidFormat(input.to_string())),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_normalize_invalid_value() {
        for input in &["2025-13-01", "2025-00-10", "2025-01-00", "2025-01-32"] {
            assert_eq!(normalize(input), Err(Error::InvalidValue(input.to_string())));
        }
    }

    #[test]
    fn test_normalize_rolls_over_short_months() {
        assert_eq!(normalize("2025-02-30").unwrap(), "2025-03-02T00:00:00.000Z");
        assert_eq!(normalize("2025-04-31").unwrap(), "2025-05-01T00:00:00.000Z");
        assert_eq!(normalize("2025-12-31").unwrap(), "2025-12-31T00:00:00.000Z");
    }

    #[test]
    fn test_parse_instant() {
        assert_eq!(
            parse_instant("2025-01-02").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2025-01-02T10:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap()
        );
        assert_eq!(
            parse_instant("2025-01-02T10:00:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
        );
        assert!(matches!(parse_instant("Tuesday"), Err(Error::InvalidValue(_))));
        assert!(matches!(parse_instant("soon"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_format() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 12, 5, 9).unwrap();
        assert_eq!(format(&instant), "2025-06-01T12:05:09.000Z");
    }
}
