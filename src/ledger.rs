//! In-memory ledger
//!
//! An ordered collection of transactions with aggregate and filter queries.
//! Insertion order is preserved and no field is required to be unique; the
//! stores enforce identity at rest.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{checked_total, Timestamp, Transaction};

/// Ordered collection of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding copies of the given transactions
    pub fn from_slice(transactions: &[Transaction]) -> Self {
        Self {
            transactions: transactions.to_vec(),
        }
    }

    /// Append a transaction
    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Remove the first transaction structurally equal to `transaction`
    ///
    /// When several equal transactions exist, the earliest inserted one goes.
    pub fn remove(&mut self, transaction: &Transaction) -> LedgerResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t == transaction)
            .ok_or_else(|| LedgerError::transaction_not_found(transaction.to_string()))?;
        Ok(self.transactions.remove(index))
    }

    /// Remove the first transaction carrying the given id
    pub fn remove_by_id(&mut self, id: i64) -> LedgerResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == Some(id))
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        Ok(self.transactions.remove(index))
    }

    /// Sum of all amounts
    ///
    /// Fails with a validation error if the sum does not fit in a `Decimal`.
    pub fn balance(&self) -> LedgerResult<Decimal> {
        checked_total(self.transactions.iter().map(|t| t.amount))
    }

    /// Sum of positive amounts
    pub fn total_income(&self) -> LedgerResult<Decimal> {
        checked_total(
            self.transactions
                .iter()
                .filter(|t| t.is_income())
                .map(|t| t.amount),
        )
    }

    /// Sum of negative amounts (a negative number or zero)
    pub fn total_expenses(&self) -> LedgerResult<Decimal> {
        checked_total(
            self.transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.amount),
        )
    }

    /// Transactions whose category matches exactly (no case folding)
    pub fn filter_by_category(&self, category: &str) -> Ledger {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Transactions with `start <= timestamp <= end`
    ///
    /// An inverted range is not an error here; it simply matches nothing.
    pub fn filter_by_date_range(&self, start: Timestamp, end: Timestamp) -> Ledger {
        self.transactions
            .iter()
            .filter(|t| t.timestamp >= start && t.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Transactions in chronological order (stable for equal timestamps)
    pub fn sorted_by_timestamp(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<_> = self.transactions.iter().collect();
        sorted.sort_by_key(|t| t.timestamp);
        sorted
    }

    /// Find a transaction by id
    pub fn find_by_id(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == Some(id))
    }

    /// Check whether a structurally equal transaction is present
    pub fn contains(&self, transaction: &Transaction) -> bool {
        self.transactions.contains(transaction)
    }

    /// Transaction at the given position
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Append every transaction of `other`, keeping its order
    pub fn merge(&mut self, other: &Ledger) {
        self.transactions.extend(other.transactions.iter().cloned());
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Transaction> for Ledger {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        self.transactions.extend(iter);
    }
}

impl IntoIterator for Ledger {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
