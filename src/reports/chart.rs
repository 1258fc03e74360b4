//! Per-category chart data
//!
//! Collects income and expense totals by category over a date range, ready
//! for bar-chart rendering.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::Timestamp;

/// Income and expense totals per category, sorted by category name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// Start of the covered range (inclusive)
    pub start: Option<Timestamp>,
    /// End of the covered range (inclusive)
    pub end: Option<Timestamp>,
    /// Every category with a transaction in range, zero amounts included
    pub categories: BTreeSet<String>,
    /// Sum of income per category
    pub income: BTreeMap<String, Decimal>,
    /// Absolute sum of expenses per category
    pub expenses: BTreeMap<String, Decimal>,
}

impl CategoryBreakdown {
    /// Break down the transactions between `start` and `end` (inclusive)
    pub fn generate(ledger: &Ledger, start: Timestamp, end: Timestamp) -> LedgerResult<Self> {
        let mut breakdown = Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        };

        breakdown.accumulate(&ledger.filter_by_date_range(start, end))?;
        Ok(breakdown)
    }

    /// Break down the whole ledger
    pub fn from_ledger(ledger: &Ledger) -> LedgerResult<Self> {
        let mut breakdown = Self::default();
        breakdown.accumulate(ledger)?;
        Ok(breakdown)
    }

    /// True when no transaction at all fell in range
    ///
    /// A range holding only zero amounts is not empty; it charts two empty
    /// sections.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest single value across both series
    pub fn max_value(&self) -> Decimal {
        self.income
            .values()
            .chain(self.expenses.values())
            .copied()
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    fn accumulate(&mut self, ledger: &Ledger) -> LedgerResult<()> {
        for txn in ledger {
            self.categories.insert(txn.category.clone());

            let (series, amount) = if txn.is_income() {
                (&mut self.income, txn.amount)
            } else if txn.is_expense() {
                (&mut self.expenses, txn.amount.abs())
            } else {
                continue;
            };

            let total = series
                .entry(txn.category.clone())
                .or_insert(Decimal::ZERO);
            *total = total
                .checked_add(amount)
                .ok_or_else(LedgerError::amount_overflow)?;
        }
        Ok(())
    }
}
