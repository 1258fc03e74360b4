//! Transaction model
//!
//! A single signed money movement. Positive amounts are income, negative
//! amounts are expenses; the classification is derived, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::timestamp::Timestamp;
use crate::error::{LedgerError, LedgerResult};

/// Persisted shape of a transaction
///
/// Every field is optional so that missing keys are reported as
/// [`LedgerError::InvalidTransaction`] by [`Transaction::from_record`]
/// rather than as a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(
        default,
        alias = "transaction_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    /// Store-assigned identifier, absent for transient transactions
    pub id: Option<i64>,

    /// When the money moved
    pub timestamp: Timestamp,

    /// Free-form category label
    pub category: String,

    /// Amount (positive for income, negative for expense)
    pub amount: Decimal,

    /// Free-text description, may be empty
    pub description: String,
}

impl Transaction {
    /// Create a new transient transaction (no id)
    pub fn new(
        timestamp: Timestamp,
        category: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            timestamp,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// Return a copy of this transaction carrying the given id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Check if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Order two transactions by amount alone
    ///
    /// This is deliberately not `Ord`: two unequal transactions can share an
    /// amount. Sort by `timestamp` for chronological order.
    pub fn cmp_by_amount(&self, other: &Self) -> Ordering {
        self.amount.cmp(&other.amount)
    }

    /// Convert to the persisted record shape
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            timestamp: Some(self.timestamp.to_iso()),
            category: Some(self.category.clone()),
            amount: Some(self.amount.to_string()),
            description: Some(self.description.clone()),
        }
    }

    /// Validate a record field by field and build a transaction
    pub fn from_record(record: TransactionRecord) -> LedgerResult<Self> {
        let raw_timestamp = record
            .timestamp
            .ok_or_else(|| missing_field("timestamp"))?;
        let timestamp = Timestamp::from_iso(&raw_timestamp).map_err(|_| {
            LedgerError::InvalidTransaction(format!("invalid timestamp: {}", raw_timestamp))
        })?;

        let raw_amount = record.amount.ok_or_else(|| missing_field("amount"))?;
        let amount = parse_amount(&raw_amount)?;

        let category = record.category.ok_or_else(|| missing_field("category"))?;
        let description = record
            .description
            .ok_or_else(|| missing_field("description"))?;

        Ok(Self {
            id: record.id,
            timestamp,
            category,
            amount,
            description,
        })
    }
}

/// Parse an exact decimal amount
///
/// Accepts plain decimal notation only ("12", "-40.50"); binary floats are
/// never involved.
pub fn parse_amount(s: &str) -> LedgerResult<Decimal> {
    Decimal::from_str(s.trim())
        .map_err(|_| LedgerError::InvalidTransaction(format!("invalid amount: {}", s)))
}

/// Sum of two transactions' amounts
pub fn amount_sum(a: &Transaction, b: &Transaction) -> LedgerResult<Decimal> {
    a.amount
        .checked_add(b.amount)
        .ok_or_else(LedgerError::amount_overflow)
}

/// Difference of two transactions' amounts (`a - b`)
pub fn amount_diff(a: &Transaction, b: &Transaction) -> LedgerResult<Decimal> {
    a.amount
        .checked_sub(b.amount)
        .ok_or_else(LedgerError::amount_overflow)
}

/// Add up amounts, failing with a validation error instead of overflowing
pub fn checked_total<I>(amounts: I) -> LedgerResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(LedgerError::amount_overflow)
    })
}

fn missing_field(name: &str) -> LedgerError {
    LedgerError::InvalidTransaction(format!("missing field '{}'", name))
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = LedgerError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        txn.to_record()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[#{}] | ", id)?,
            None => write!(f, "[# - ] | ")?,
        }
        write!(
            f,
            "{} | {}: {} ({})",
            self.timestamp, self.category, self.amount, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(day: u32) -> Timestamp {
        Timestamp::from_ymd(2025, 1, day).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_income_expense() {
        let income = Transaction::new(ts(10), "salary", dec("100"), "");
        assert!(income.is_income());
        assert!(!income.is_expense());

        let expense = Transaction::new(ts(10), "food", dec("-12.50"), "lunch");
        assert!(!expense.is_income());
        assert!(expense.is_expense());

        let zero = Transaction::new(ts(10), "noop", Decimal::ZERO, "");
        assert!(!zero.is_income());
        assert!(!zero.is_expense());
    }

    #[test]
    fn test_structural_equality_includes_id() {
        let a = Transaction::new(ts(10), "food", dec("-5"), "x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.clone().with_id(1), b);
        assert_ne!(a.clone().with_id(1), a.clone().with_id(2));
    }

    #[test]
    fn test_cmp_by_amount() {
        let small = Transaction::new(ts(20), "a", dec("-40"), "");
        let large = Transaction::new(ts(1), "b", dec("100"), "");
        assert_eq!(small.cmp_by_amount(&large), Ordering::Less);

        let mut txns = vec![large.clone(), small.clone()];
        txns.sort_by(Transaction::cmp_by_amount);
        assert_eq!(txns, vec![small, large]);
    }

    #[test]
    fn test_amount_helpers() {
        let a = Transaction::new(ts(1), "a", dec("10.25"), "");
        let b = Transaction::new(ts(2), "b", dec("-0.25"), "");
        assert_eq!(amount_sum(&a, &b).unwrap(), dec("10.00"));
        assert_eq!(amount_diff(&a, &b).unwrap(), dec("10.50"));
    }

    #[test]
    fn test_amount_helpers_report_overflow() {
        let max = Transaction::new(ts(1), "a", Decimal::MAX, "");
        let min = Transaction::new(ts(2), "b", Decimal::MIN, "");

        assert!(amount_sum(&max, &max).unwrap_err().is_validation());
        assert!(amount_diff(&max, &min).unwrap_err().is_validation());
        assert_eq!(amount_sum(&max, &min).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(checked_total(Vec::new()).unwrap(), Decimal::ZERO);
        assert_eq!(
            checked_total([dec("1.10"), dec("-0.10"), dec("2")]).unwrap(),
            dec("3.00")
        );

        let err = checked_total([Decimal::MAX, Decimal::ONE]).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: amount overflow");
    }

    #[test]
    fn test_record_round_trip_keeps_exact_amount() {
        let txn = Transaction::new(
            Timestamp::from_components(2025, 1, 10, 9, 30, 0, 0).unwrap(),
            "food",
            dec("-0.10"),
            "coffee",
        )
        .with_id(7);

        let record = txn.to_record();
        assert_eq!(record.amount.as_deref(), Some("-0.10"));
        assert_eq!(record.timestamp.as_deref(), Some("2025-01-10T09:30:00"));

        let back = Transaction::from_record(record).unwrap();
        assert_eq!(back, txn);
        assert_eq!(back.amount.to_string(), "-0.10");
    }

    #[test]
    fn test_from_record_missing_amount() {
        let record = TransactionRecord {
            id: None,
            timestamp: Some("2025-01-10T00:00:00".into()),
            category: Some("food".into()),
            amount: None,
            description: Some(String::new()),
        };
        assert!(matches!(
            Transaction::from_record(record),
            Err(LedgerError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_from_record_invalid_values() {
        let base = Transaction::new(ts(10), "food", dec("1"), "").to_record();

        let mut bad_ts = base.clone();
        bad_ts.timestamp = Some("tomorrow".into());
        assert!(matches!(
            Transaction::from_record(bad_ts),
            Err(LedgerError::InvalidTransaction(_))
        ));

        let mut bad_amount = base.clone();
        bad_amount.amount = Some("twelve".into());
        assert!(matches!(
            Transaction::from_record(bad_amount),
            Err(LedgerError::InvalidTransaction(_))
        ));

        let mut no_category = base.clone();
        no_category.category = None;
        assert!(Transaction::from_record(no_category).is_err());

        let mut no_description = base;
        no_description.description = None;
        assert!(Transaction::from_record(no_description).is_err());
    }

    #[test]
    fn test_json_shape() {
        let txn = Transaction::new(ts(10), "salary", dec("100.00"), "January");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["amount"], "100.00");
        assert_eq!(json["timestamp"], "2025-01-10T00:00:00");
        assert!(json.get("id").is_none());

        let legacy = r#"{"transaction_id": 3, "timestamp": "2025-01-10", "category": "x",
                         "amount": "-1", "description": ""}"#;
        let parsed: Transaction = serde_json::from_str(legacy).unwrap();
        assert_eq!(parsed.id, Some(3));

        let missing = r#"{"timestamp": "2025-01-10", "category": "x", "description": ""}"#;
        assert!(serde_json::from_str::<Transaction>(missing).is_err());
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(ts(10), "food", dec("-4.20"), "bagel");
        assert_eq!(
            txn.to_string(),
            "[# - ] | 2025-01-10T00:00:00 | food: -4.20 (bagel)"
        );
        assert_eq!(
            txn.with_id(5).to_string(),
            "[#5] | 2025-01-10T00:00:00 | food: -4.20 (bagel)"
        );
    }
}
