//! Parsing of the date formats accepted by the CO-OPS API and of the timestamps it returns.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Request date formats, tried in this order.
const REQUEST_DATE_FORMATS: [&str; 2] = ["%Y%m%d", "%m/%d/%Y"];
const REQUEST_DATETIME_FORMATS: [&str; 2] = ["%Y%m%d %H:%M", "%m/%d/%Y %H:%M"];

/// Timestamp formats seen in CO-OPS JSON responses.
const OBSERVATION_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Returned when a date string matches none of the accepted request formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "No valid date format found for '{input}'. Accepted formats are yyyyMMdd, yyyyMMdd HH:mm, \
     MM/dd/yyyy and MM/dd/yyyy HH:mm (see https://tidesandcurrents.noaa.gov/api/)"
)]
pub struct FormatError {
    pub input: String,
}

/// Converts naive timestamps coming out of the API into UTC instants.
///
/// The service returns wall-clock times in whatever `time_zone` was requested
/// and never includes an offset, so the naive value is tagged as UTC as-is.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoUtcDateTime for NaiveDate {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.and_time(chrono::NaiveTime::MIN))
    }
}

impl IntoUtcDateTime for DateTime<Utc> {
    fn into_utc(self) -> DateTime<Utc> {
        self
    }
}

/// Parses a request date in one of the four formats accepted by the API:
/// `yyyyMMdd`, `yyyyMMdd HH:mm`, `MM/dd/yyyy`, `MM/dd/yyyy HH:mm`.
///
/// Date-only inputs resolve to midnight. The first format that parses wins.
///
/// # Examples
///
/// ```
/// use coops_tides::parse_request_date;
///
/// let a = parse_request_date("20240301").unwrap();
/// let b = parse_request_date("03/01/2024").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_request_date("2024-03-01").is_err());
/// ```
pub fn parse_request_date(text: &str) -> Result<DateTime<Utc>, FormatError> {
    // Order matters: yyyyMMdd, yyyyMMdd HH:mm, MM/dd/yyyy, MM/dd/yyyy HH:mm
    for (date_fmt, datetime_fmt) in REQUEST_DATE_FORMATS.iter().zip(REQUEST_DATETIME_FORMATS) {
        if let Ok(date) = NaiveDate::parse_from_str(text, date_fmt) {
            return Ok(date.into_utc());
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, datetime_fmt) {
            return Ok(datetime.into_utc());
        }
    }
    Err(FormatError {
        input: text.to_string(),
    })
}

/// Formats an instant the way it is sent back to the API (`yyyyMMdd HH:mm`).
pub(crate) fn format_request_date(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y%m%d %H:%M").to_string()
}

/// Parses a timestamp cell (`t`) from a response body.
pub(crate) fn parse_observation_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    OBSERVATION_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(IntoUtcDateTime::into_utc)
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| parse_request_date(text).ok())
}
