//! Budget status report
//!
//! Compares spending per category against its budget limit over a period.

use rust_decimal::Decimal;

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::models::{checked_total, Budget, Timestamp};

/// Spending against one budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatusRow {
    pub category: String,
    pub limit: Decimal,
    /// Absolute amount spent in the period
    pub spent: Decimal,
    /// `limit - spent`, negative when overspent
    pub remaining: Decimal,
    pub exceeded: bool,
}

/// Spending against every budget over a period
#[derive(Debug, Clone)]
pub struct BudgetStatusReport {
    pub start: Timestamp,
    pub end: Timestamp,
    pub rows: Vec<BudgetStatusRow>,
    /// Sum of all limits
    pub total_limit: Decimal,
    /// Sum of all spending against a budget
    pub total_spent: Decimal,
}

impl BudgetStatusReport {
    /// Generate a status row per budget, in the order the budgets are given
    ///
    /// Fails with a validation error if a total does not fit in a `Decimal`.
    pub fn generate(
        ledger: &Ledger,
        budgets: &[Budget],
        start: Timestamp,
        end: Timestamp,
    ) -> LedgerResult<Self> {
        let in_range = ledger.filter_by_date_range(start, end);

        let rows = budgets
            .iter()
            .map(|budget| -> LedgerResult<BudgetStatusRow> {
                let spent = checked_total(
                    in_range
                        .iter()
                        .filter(|t| t.category == budget.category && t.is_expense())
                        .map(|t| t.amount.abs()),
                )?;
                Ok(BudgetStatusRow {
                    category: budget.category.clone(),
                    limit: budget.limit,
                    spent,
                    remaining: budget.remaining(spent),
                    exceeded: budget.is_exceeded_by(spent),
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        let total_limit = checked_total(rows.iter().map(|r| r.limit))?;
        let total_spent = checked_total(rows.iter().map(|r| r.spent))?;

        Ok(Self {
            start,
            end,
            rows,
            total_limit,
            total_spent,
        })
    }

    /// Rows whose spending exceeds the limit
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetStatusRow> {
        self.rows.iter().filter(|r| r.exceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(month: u32, day: u32, category: &str, amount: &str) -> Transaction {
        Transaction::new(
            Timestamp::from_ymd(2025, month, day).unwrap(),
            category,
            dec(amount),
            "",
        )
    }

    #[test]
    fn test_budget_status() {
        let mut ledger = Ledger::new();
        ledger.add(txn(1, 5, "food", "-60"));
        ledger.add(txn(1, 18, "food", "-55"));
        ledger.add(txn(1, 20, "food", "10"));
        ledger.add(txn(1, 21, "rent", "-900"));
        ledger.add(txn(2, 1, "food", "-500"));

        let budgets = vec![
            Budget::new("food", dec("100")).unwrap(),
            Budget::new("rent", dec("1000")).unwrap(),
            Budget::new("fun", dec("50")).unwrap(),
        ];

        let report = BudgetStatusReport::generate(
            &ledger,
            &budgets,
            Timestamp::from_ymd(2025, 1, 1).unwrap(),
            Timestamp::from_ymd(2025, 1, 31).unwrap().end_of_day(),
        )
        .unwrap();

        assert_eq!(report.rows.len(), 3);
        let food = &report.rows[0];
        assert_eq!(food.spent, dec("115"));
        assert_eq!(food.remaining, dec("-15"));
        assert!(food.exceeded);

        let rent = &report.rows[1];
        assert_eq!(rent.remaining, dec("100"));
        assert!(!rent.exceeded);

        let fun = &report.rows[2];
        assert_eq!(fun.spent, Decimal::ZERO);

        let over: Vec<_> = report.over_budget().map(|r| r.category.as_str()).collect();
        assert_eq!(over, vec!["food"]);
        assert_eq!(report.total_limit, dec("1150"));
        assert_eq!(report.total_spent, dec("1015"));
    }

    #[test]
    fn test_budget_status_spending_overflow() {
        let mut ledger = Ledger::new();
        ledger.add(Transaction::new(
            Timestamp::from_ymd(2025, 1, 2).unwrap(),
            "food",
            Decimal::MIN,
            "",
        ));
        ledger.add(Transaction::new(
            Timestamp::from_ymd(2025, 1, 3).unwrap(),
            "food",
            Decimal::MIN,
            "",
        ));
        let budgets = vec![Budget::new("food", dec("100")).unwrap()];

        let err = BudgetStatusReport::generate(
            &ledger,
            &budgets,
            Timestamp::from_ymd(2025, 1, 1).unwrap(),
            Timestamp::from_ymd(2025, 1, 31).unwrap(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
