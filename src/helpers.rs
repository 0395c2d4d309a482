//! Calendar date parsing and formatting.
//!
//! Close approach data from JPL stores its dates as calendar strings such as
//! `"2020-Jan-01 00:00"`. These helpers turn them into naive UTC datetimes and
//! back into a minute-precision display string, the finest precision present
//! in the data set.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;

/// Input layout of the data set.
const CALENDAR_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Same layout with seconds and optional fractional seconds.
const CALENDAR_FORMAT_SECONDS: &str = "%Y-%b-%d %H:%M:%S%.f";

/// Minute-precision output layout.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses and formats close approach calendar dates.
///
/// Implementations must be stateless: parsing the output of [`Calendar::format`]
/// is not required, but formatting two datetimes within the same minute must
/// produce the same string.
pub trait Calendar {
    fn parse(&self, calendar_date: &str) -> Result<NaiveDateTime>;

    fn format(&self, time: &NaiveDateTime) -> String;
}

/// Calendar used by the NASA/JPL close approach data set.
#[derive(Debug, Default, Clone, Copy)]
pub struct NasaCalendar;

impl Calendar for NasaCalendar {
    fn parse(&self, calendar_date: &str) -> Result<NaiveDateTime> {
        cd_to_datetime(calendar_date)
    }

    fn format(&self, time: &NaiveDateTime) -> String {
        datetime_to_str(time)
    }
}

/// Converts a calendar date such as `"2020-Jan-01 00:00"` into a datetime.
///
/// Seconds and fractional seconds are accepted when present.
pub fn cd_to_datetime(calendar_date: &str) -> Result<NaiveDateTime> {
    let input = calendar_date.trim();
    NaiveDateTime::parse_from_str(input, CALENDAR_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, CALENDAR_FORMAT_SECONDS))
        .map_err(|source| Error::InvalidDate {
            input: calendar_date.to_string(),
            source,
        })
}

/// Formats a datetime to minute precision, e.g. `"2020-01-01 00:00"`.
pub fn datetime_to_str(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}
