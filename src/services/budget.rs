//! Budget service
//!
//! Per-category limits and how current spending compares to them.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::Budget;
use crate::reports::{BudgetStatusReport, ReportPeriod};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All budgets, sorted by category
    pub fn list(&self) -> LedgerResult<Vec<Budget>> {
        let mut budgets = self.storage.store().load_all_budgets()?;
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    /// Set the limit for a category, replacing any existing limit
    pub fn set(&self, category: &str, limit: Decimal) -> LedgerResult<Budget> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("Category cannot be empty".into()));
        }

        let budget = Budget::new(category, limit)?;
        self.storage.store().upsert_budget(&budget)?;
        Ok(budget)
    }

    /// Remove the budget for a category
    pub fn remove(&self, category: &str) -> LedgerResult<()> {
        let category = category.trim();
        if self.storage.store().delete_budget(category)? {
            Ok(())
        } else {
            Err(LedgerError::budget_not_found(category))
        }
    }

    /// Spending against every budget over a period
    pub fn status(&self, period: &ReportPeriod) -> LedgerResult<BudgetStatusReport> {
        let (start, end) = period.bounds()?;
        let ledger: Ledger = self
            .storage
            .store()
            .load_all_transactions()?
            .into_iter()
            .collect();
        let budgets = self.list()?;

        BudgetStatusReport::generate(&ledger, &budgets, start, end)
    }
}
