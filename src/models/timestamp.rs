//! Timestamp value type
//!
//! A naive (time-zone-less) date-time with microsecond precision. Values are
//! validated on construction and compare chronologically.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// Formats accepted after the date part has passed the shape check
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// An immutable point in (local, naive) time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Build a timestamp from explicit components
    ///
    /// Fails with [`LedgerError::InvalidDate`] when the components do not name
    /// a real calendar date and time of day.
    pub fn from_components(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> LedgerResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LedgerError::InvalidDate(format!(
                "year {} out of range {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            LedgerError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day))
        })?;

        // from_hms_micro_opt accepts leap-second microseconds, we do not
        if microsecond >= 1_000_000 {
            return Err(LedgerError::InvalidDate(format!(
                "microsecond {} out of range",
                microsecond
            )));
        }
        let time = NaiveTime::from_hms_micro_opt(hour, minute, second, microsecond).ok_or_else(
            || {
                LedgerError::InvalidDate(format!(
                    "{:02}:{:02}:{:02}.{:06}",
                    hour, minute, second, microsecond
                ))
            },
        )?;

        Ok(Self(date.and_time(time)))
    }

    /// Midnight at the start of the given day
    pub fn from_ymd(year: i32, month: u32, day: u32) -> LedgerResult<Self> {
        Self::from_components(year, month, day, 0, 0, 0, 0)
    }

    /// The current local date and time, truncated to microseconds
    pub fn now() -> Self {
        Self::truncated(Local::now().naive_local())
    }

    /// Parse an ISO-8601 date or date-time
    ///
    /// Accepted shapes: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`,
    /// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DDTHH:MM:SS.ffffff`. A single space
    /// may replace the `T`.
    pub fn from_iso(s: &str) -> LedgerResult<Self> {
        let invalid = || LedgerError::InvalidFormat(s.to_string());

        if !has_date_shape(s) {
            return Err(invalid());
        }

        let parsed = if s.len() == 10 {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        } else {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        };
        let dt = parsed.ok_or_else(invalid)?;

        // Reject leap seconds and anything finer than a microsecond
        let nanos = dt.nanosecond();
        if nanos >= 1_000_000_000 || nanos % 1_000 != 0 {
            return Err(invalid());
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&dt.year()) {
            return Err(invalid());
        }

        Ok(Self(dt))
    }

    /// Canonical ISO-8601 rendering
    ///
    /// The fractional part is omitted when the microsecond is zero, so that
    /// `from_iso(t.to_iso()) == t` for every timestamp.
    pub fn to_iso(&self) -> String {
        if self.microsecond() == 0 {
            self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            self.0.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        }
    }

    /// Format with a custom strftime pattern
    ///
    /// Fails with [`LedgerError::InvalidFormat`] when the pattern has an
    /// unknown specifier or one a naive date-time cannot fill (such as `%z`).
    pub fn try_format(&self, pattern: &str) -> LedgerResult<String> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(pattern))
            .map_err(|_| LedgerError::InvalidFormat(format!("bad date pattern: {}", pattern)))?;
        Ok(out)
    }

    /// Format with a custom strftime pattern (display only)
    ///
    /// Falls back to ISO form when the pattern cannot be used.
    pub fn format(&self, pattern: &str) -> String {
        self.try_format(pattern).unwrap_or_else(|_| self.to_iso())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn microsecond(&self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// The calendar date component
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// The last representable instant of this timestamp's day
    pub fn end_of_day(&self) -> Self {
        let last = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
        Self(self.0.date().and_time(last))
    }

    /// Borrow the underlying chrono value
    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    fn truncated(dt: NaiveDateTime) -> Self {
        let nanos = dt.nanosecond().min(999_999_999);
        Self(dt.with_nanosecond(nanos / 1_000 * 1_000).unwrap_or(dt))
    }
}

/// `YYYY-MM-DD` prefix with four-digit year and two-digit month/day
fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl FromStr for Timestamp {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_iso(&s).map_err(serde::de::Error::custom)
    }
}
