//! Monday-to-Sunday week windows.

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The Monday-through-Sunday span containing a date.
///
/// Invariants: `start` is a Monday and `end == start + 6 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekRange {
    /// Compute the window that contains `date`.
    ///
    /// At the edges of the representable calendar the window is clamped to
    /// `NaiveDate::MIN` / `NaiveDate::MAX`.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start = date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The seven dates of the window, Monday first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(7)
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Tuple form of [`WeekRange::containing`].
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let range = WeekRange::containing(date);
    (range.start, range.end)
}

/// Time-of-day suffixes accepted after the date part.
const DATETIME_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a caller-supplied date.
///
/// Accepts `YYYY-MM-DD` with a four-digit year and two-digit month and day,
/// optionally followed by a time (`T10:00`, `T10:00:00.5`, or an RFC 3339
/// offset form such as `T10:00:00+02:00`). The date part is used as written.
pub fn parse_date(input: &str) -> Result<NaiveDate, crate::Error> {
    let input = input.trim();
    let invalid = || crate::Error::InvalidDate(input.to_string());

    if !has_iso_date_prefix(input) {
        return Err(invalid());
    }
    let (day, time) = input.split_at(10);
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid())?;
    if time.is_empty() {
        return Ok(date);
    }

    let naive = DATETIME_FORMATS.iter().any(|f| NaiveDateTime::parse_from_str(input, f).is_ok());
    if naive || DateTime::parse_from_rfc3339(input).is_ok() { Ok(date) } else { Err(invalid()) }
}

/// `true` when `input` starts with `DDDD-DD-DD`.
fn has_iso_date_prefix(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 10
        && bytes[..10]
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
}
