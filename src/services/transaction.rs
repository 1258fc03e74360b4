//! Transaction service
//!
//! Keeps an in-memory [`Ledger`] in step with the active store: every
//! mutation is persisted first and then applied to the ledger.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Timestamp, Transaction};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    ledger: Ledger,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category (exact match)
    pub category: Option<String>,
    /// Inclusive lower bound
    pub from: Option<Timestamp>,
    /// Inclusive upper bound
    pub to: Option<Timestamp>,
    /// Keep only the most recent N matches
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, from: Timestamp, to: Timestamp) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.timestamp > to {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub category: String,
    pub amount: Decimal,
    /// Defaults to now
    pub timestamp: Option<Timestamp>,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Load every stored transaction into a ledger
    pub fn load(storage: &'a Storage) -> LedgerResult<Self> {
        let ledger: Ledger = storage.store().load_all_transactions()?.into_iter().collect();
        tracing::debug!(count = ledger.len(), "loaded ledger");
        Ok(Self { storage, ledger })
    }

    /// The in-memory ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Re-read the ledger from the store
    pub fn reload(&mut self) -> LedgerResult<()> {
        self.ledger = self
            .storage
            .store()
            .load_all_transactions()?
            .into_iter()
            .collect();
        Ok(())
    }

    /// Persist a new transaction and add it to the ledger
    pub fn add(&mut self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        let category = input.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("Category cannot be empty".into()));
        }

        let transaction = Transaction::new(
            input.timestamp.unwrap_or_else(Timestamp::now),
            category,
            input.amount,
            input.description.unwrap_or_default().trim(),
        );

        let saved = self.storage.store().save_transaction(&transaction)?;
        self.ledger.add(saved.clone());
        Ok(saved)
    }

    /// Delete a transaction by id from the store and the ledger
    pub fn remove(&mut self, id: i64) -> LedgerResult<Transaction> {
        let removed = self
            .storage
            .store()
            .delete_transaction(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        if self.ledger.remove_by_id(id).is_err() {
            tracing::warn!(id, "deleted transaction was not in the loaded ledger");
        }
        Ok(removed)
    }

    /// Matching transactions in chronological order
    pub fn list(&self, filter: &TransactionFilter) -> LedgerResult<Vec<&Transaction>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(LedgerError::InvalidRange {
                    start: from.to_iso(),
                    end: to.to_iso(),
                });
            }
        }

        let mut matches: Vec<&Transaction> = self
            .ledger
            .sorted_by_timestamp()
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();

        if let Some(limit) = filter.limit {
            let skip = matches.len().saturating_sub(limit);
            matches = matches.split_off(skip);
        }

        Ok(matches)
    }
}
