//! Report periods
//!
//! A period is a calendar month, a calendar year or an explicit inclusive
//! range. Each resolves to inclusive `(start, end)` timestamps.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Timestamp;

/// Period a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Calendar month (e.g., "2025-01")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2025")
    Year(i32),

    /// Inclusive range (e.g., "2025-01-01..2025-03-31")
    Range { start: Timestamp, end: Timestamp },
}

impl ReportPeriod {
    /// The month containing today
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Month: "2025-01"
    /// - Year: "2025"
    /// - Range: "2025-01-01..2025-01-15" (a date-only end covers that whole day)
    pub fn parse(s: &str) -> LedgerResult<Self> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = Timestamp::from_iso(start.trim())?;
            let end_str = end.trim();
            let end = Timestamp::from_iso(end_str)?;
            let end = if end_str.len() == 10 { end.end_of_day() } else { end };
            return Ok(Self::Range { start, end });
        }

        let invalid = || {
            LedgerError::Validation(format!(
                "Invalid period '{}'. Use YYYY-MM, YYYY or START..END",
                s
            ))
        };

        match s.len() {
            7 => {
                let (year, month) = s.split_once('-').ok_or_else(invalid)?;
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(LedgerError::InvalidMonth(month));
                }
                Ok(Self::Month { year, month })
            }
            4 => s.parse().map(Self::Year).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Inclusive bounds of this period
    pub fn bounds(&self) -> LedgerResult<(Timestamp, Timestamp)> {
        match self {
            Self::Month { year, month } => month_bounds(*year, *month),
            Self::Year(year) => year_bounds(*year),
            Self::Range { start, end } => {
                if start > end {
                    return Err(LedgerError::InvalidRange {
                        start: start.to_iso(),
                        end: end.to_iso(),
                    });
                }
                Ok((*start, *end))
            }
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year(year) => write!(f, "{:04}", year),
            Self::Range { start, end } => write!(f, "{}..{}", start, end),
        }
    }
}

/// First instant and last microsecond of a calendar month
pub fn month_bounds(year: i32, month: u32) -> LedgerResult<(Timestamp, Timestamp)> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidMonth(month));
    }
    let start = Timestamp::from_ymd(year, month, 1)?;
    let last_day = last_day_of_month(year, month)
        .ok_or_else(|| LedgerError::InvalidDate(format!("{:04}-{:02}", year, month)))?;
    let end = Timestamp::from_ymd(year, month, last_day)?.end_of_day();
    Ok((start, end))
}

/// First instant of Jan 1 and last microsecond of Dec 31
pub fn year_bounds(year: i32) -> LedgerResult<(Timestamp, Timestamp)> {
    let start = Timestamp::from_ymd(year, 1, 1)?;
    let end = Timestamp::from_ymd(year, 12, 31)?.end_of_day();
    Ok((start, end))
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
}
