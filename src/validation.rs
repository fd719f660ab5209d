//! Reusable helpers that reject malformed dates, date ranges, and months
//! before they reach the database.

use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

/// The calendar date format accepted by the API, e.g. "2024-11-10".
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The error returned when a date range fails validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// One of the dates was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidFormat,

    /// The start of the range was later than its end.
    #[error("Start date cannot be later than end date.")]
    StartAfterEnd,
}

/// The error returned when a month fails validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MonthError {
    /// The month was not an integer.
    #[error("Invalid month format. Use an integer (1-12).")]
    InvalidFormat,

    /// The month was an integer outside [1, 12].
    #[error("Month must be between 1 and 12.")]
    OutOfRange,
}

/// Parse `text` as an ISO `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns a [time::error::Parse] if `text` is not a valid calendar date in
/// that format.
pub fn parse_iso_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, DATE_FORMAT)
}

/// Parse and validate an inclusive date range.
///
/// Both dates must be valid `YYYY-MM-DD` calendar dates and `start` must be
/// no later than `end`.
///
/// Note that the date-range query endpoint parses its dates individually and
/// does not enforce the start/end ordering, so a reversed range yields an
/// empty result rather than an error there. Callers that want the stricter
/// behaviour should use this function.
///
/// # Errors
/// Returns a [DateRangeError] describing the first check that failed.
pub fn validate_date_range(start: &str, end: &str) -> Result<(Date, Date), DateRangeError> {
    let start = parse_iso_date(start).map_err(|_| DateRangeError::InvalidFormat)?;
    let end = parse_iso_date(end).map_err(|_| DateRangeError::InvalidFormat)?;

    if start > end {
        return Err(DateRangeError::StartAfterEnd);
    }

    Ok((start, end))
}

/// Parse `text` as a calendar month number in [1, 12].
///
/// # Errors
/// Returns a [MonthError] if `text` is not an integer or is out of range.
pub fn parse_month(text: &str) -> Result<Month, MonthError> {
    let month: i64 = text.trim().parse().map_err(|_| MonthError::InvalidFormat)?;

    let month = u8::try_from(month).map_err(|_| MonthError::OutOfRange)?;

    Month::try_from(month).map_err(|_| MonthError::OutOfRange)
}
