//! Income/expense/balance summaries
//!
//! Turns a ledger plus a period into a three-field [`Summary`] and exports
//! summaries as two-column CSV.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::period::{month_bounds, year_bounds, ReportPeriod};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::Timestamp;

/// Aggregate over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of positive amounts
    pub income: Decimal,
    /// Sum of negative amounts (zero or negative)
    pub expenses: Decimal,
    /// `income + expenses`
    pub balance: Decimal,
}

impl Summary {
    /// Summarize every transaction in the ledger
    pub fn of(ledger: &Ledger) -> LedgerResult<Self> {
        let income = ledger.total_income()?;
        let expenses = ledger.total_expenses()?;
        let balance = income
            .checked_add(expenses)
            .ok_or_else(LedgerError::amount_overflow)?;
        Ok(Self {
            income,
            expenses,
            balance,
        })
    }

    /// Field/value pairs in export order
    pub fn entries(&self) -> [(&'static str, Decimal); 3] {
        [
            ("income", self.income),
            ("expenses", self.expenses),
            ("balance", self.balance),
        ]
    }
}

/// Summary for one calendar month
///
/// Fails with [`LedgerError::InvalidMonth`] unless `1 <= month <= 12`.
pub fn monthly_summary(ledger: &Ledger, year: i32, month: u32) -> LedgerResult<Summary> {
    let (start, end) = month_bounds(year, month)?;
    Summary::of(&ledger.filter_by_date_range(start, end))
}

/// Summary for one calendar year
pub fn yearly_summary(ledger: &Ledger, year: i32) -> LedgerResult<Summary> {
    let (start, end) = year_bounds(year)?;
    Summary::of(&ledger.filter_by_date_range(start, end))
}

/// Summary for an inclusive range
///
/// Unlike [`Ledger::filter_by_date_range`], an inverted range is rejected
/// with [`LedgerError::InvalidRange`].
pub fn range_summary(ledger: &Ledger, start: Timestamp, end: Timestamp) -> LedgerResult<Summary> {
    if start > end {
        return Err(LedgerError::InvalidRange {
            start: start.to_iso(),
            end: end.to_iso(),
        });
    }
    Summary::of(&ledger.filter_by_date_range(start, end))
}

/// Summary for any report period
pub fn summarize(ledger: &Ledger, period: &ReportPeriod) -> LedgerResult<Summary> {
    match period {
        ReportPeriod::Month { year, month } => monthly_summary(ledger, *year, *month),
        ReportPeriod::Year(year) => yearly_summary(ledger, *year),
        ReportPeriod::Range { start, end } => range_summary(ledger, *start, *end),
    }
}

/// Write a summary as `field,value` CSV
pub fn write_summary_csv<W: Write>(summary: &Summary, writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["field", "value"])?;
    for (field, value) in summary.entries() {
        csv_writer.write_record([field.to_string(), value.to_string()])?;
    }
    csv_writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// Export a summary to a CSV file, creating parent directories as needed
pub fn export_summary_csv<P: AsRef<Path>>(summary: &Summary, path: P) -> LedgerResult<PathBuf> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = fs::File::create(path)
        .map_err(|e| LedgerError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    write_summary_csv(summary, file)?;

    tracing::info!(path = %path.display(), "exported summary CSV");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(ts: Timestamp, category: &str, amount: &str) -> Transaction {
        Transaction::new(ts, category, dec(amount), "")
    }

    fn day(year: i32, month: u32, day: u32) -> Timestamp {
        Timestamp::from_ymd(year, month, day).unwrap()
    }

    /// Summary over the half-open interval [start, next_start)
    fn half_open(ledger: &Ledger, start: Timestamp, next_start: Timestamp) -> Summary {
        let filtered: Ledger = ledger
            .iter()
            .filter(|t| t.timestamp >= start && t.timestamp < next_start)
            .cloned()
            .collect();
        Summary::of(&filtered).unwrap()
    }

    #[test]
    fn test_monthly_scenario() {
        let mut ledger = Ledger::new();
        ledger.add(at(day(2025, 1, 10), "inc", "100"));
        ledger.add(at(day(2025, 1, 20), "exp", "-40"));

        let summary = monthly_summary(&ledger, 2025, 1).unwrap();
        assert_eq!(
            summary,
            Summary {
                income: dec("100"),
                expenses: dec("-40"),
                balance: dec("60"),
            }
        );
    }

    #[test]
    fn test_invalid_month() {
        let ledger = Ledger::new();
        assert!(matches!(
            monthly_summary(&ledger, 2025, 0),
            Err(LedgerError::InvalidMonth(0))
        ));
        assert!(matches!(
            monthly_summary(&ledger, 2025, 13),
            Err(LedgerError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_month_boundaries_match_half_open_form() {
        let last_micro = |y, m, d| Timestamp::from_components(y, m, d, 23, 59, 59, 999_999).unwrap();
        let mut ledger = Ledger::new();
        ledger.add(at(day(2024, 12, 1), "a", "1"));
        ledger.add(at(last_micro(2024, 12, 31), "a", "2"));
        ledger.add(at(day(2025, 1, 1), "a", "4"));
        ledger.add(at(last_micro(2024, 2, 28), "b", "8"));
        ledger.add(at(last_micro(2024, 2, 29), "b", "16"));
        ledger.add(at(day(2024, 3, 1), "b", "32"));
        ledger.add(at(last_micro(2025, 2, 28), "c", "64"));
        ledger.add(at(day(2025, 3, 1), "c", "128"));

        for (year, month) in [(2024, 12), (2025, 1), (2024, 2), (2025, 2), (2024, 3)] {
            let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
            let expected = half_open(&ledger, day(year, month, 1), day(ny, nm, 1));
            assert_eq!(
                monthly_summary(&ledger, year, month).unwrap(),
                expected,
                "{}-{:02}",
                year,
                month
            );
        }

        assert_eq!(monthly_summary(&ledger, 2024, 12).unwrap().income, dec("3"));
        assert_eq!(monthly_summary(&ledger, 2024, 2).unwrap().income, dec("24"));
        assert_eq!(monthly_summary(&ledger, 2025, 2).unwrap().income, dec("64"));
    }

    #[test]
    fn test_yearly_summary() {
        let mut ledger = Ledger::new();
        ledger.add(at(day(2024, 12, 31).end_of_day(), "a", "-5"));
        ledger.add(at(day(2025, 1, 1), "a", "10"));
        ledger.add(at(day(2025, 12, 31).end_of_day(), "a", "-3"));
        ledger.add(at(day(2026, 1, 1), "a", "99"));

        let summary = yearly_summary(&ledger, 2025).unwrap();
        assert_eq!(summary.income, dec("10"));
        assert_eq!(summary.expenses, dec("-3"));
        assert_eq!(summary.balance, dec("7"));
        assert_eq!(summary, half_open(&ledger, day(2025, 1, 1), day(2026, 1, 1)));
    }

    #[test]
    fn test_range_summary() {
        let mut ledger = Ledger::new();
        ledger.add(at(day(2025, 1, 5), "a", "10"));
        ledger.add(at(day(2025, 1, 6), "a", "-4"));

        let summary = range_summary(&ledger, day(2025, 1, 5), day(2025, 1, 6)).unwrap();
        assert_eq!(summary.balance, dec("6"));

        let err = range_summary(&ledger, day(2025, 1, 6), day(2025, 1, 5)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRange { .. }));
        assert!(ledger
            .filter_by_date_range(day(2025, 1, 6), day(2025, 1, 5))
            .is_empty());
    }

    #[test]
    fn test_monthly_summary_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.add(Transaction::new(day(2025, 1, 1), "big", Decimal::MAX, ""));
        ledger.add(Transaction::new(day(2025, 1, 2), "big", Decimal::MAX, ""));
        ledger.add(Transaction::new(day(2025, 2, 1), "big", Decimal::MAX, ""));

        let err = monthly_summary(&ledger, 2025, 1).unwrap_err();
        assert!(err.is_validation());

        let february = monthly_summary(&ledger, 2025, 2).unwrap();
        assert_eq!(february.balance, Decimal::MAX);
    }

    #[test]
    fn test_summarize_dispatch() {
        let mut ledger = Ledger::new();
        ledger.add(at(day(2025, 3, 5), "a", "10"));

        let month = ReportPeriod::Month { year: 2025, month: 3 };
        assert_eq!(summarize(&ledger, &month).unwrap().income, dec("10"));
        let year = ReportPeriod::Year(2024);
        assert_eq!(summarize(&ledger, &year).unwrap(), Summary::default());
    }

    #[test]
    fn test_export_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("summary.csv");
        let summary = Summary {
            income: dec("123.45"),
            expenses: dec("-67.89"),
            balance: dec("55.56"),
        };

        let written = export_summary_csv(&summary, &path).unwrap();
        assert_eq!(written, path);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "field,value",
                "income,123.45",
                "expenses,-67.89",
                "balance,55.56"
            ]
        );
    }

    #[test]
    fn test_export_csv_to_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = export_summary_csv(&Summary::default(), blocker.join("out.csv")).unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
