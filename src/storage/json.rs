//! JSON document store
//!
//! Keeps every transaction and budget in a single `ledger.json` document:
//!
//! ```json
//! { "next_id": 3, "transactions": [...], "budgets": [...] }
//! ```
//!
//! Every mutation re-reads the document and writes it back atomically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::file_io::{read_document, write_document_atomic};
use super::LedgerStore;
use crate::error::LedgerResult;
use crate::models::{Budget, BudgetRecord, Transaction, TransactionRecord};

/// On-disk shape of the ledger document
///
/// Rows are kept as records so a malformed row surfaces as
/// `InvalidTransaction`/`InvalidBudget` instead of a parse failure of the
/// whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerDocument {
    #[serde(default = "first_id")]
    next_id: i64,
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
    #[serde(default)]
    budgets: Vec<BudgetRecord>,
}

fn first_id() -> i64 {
    1
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            transactions: Vec::new(),
            budgets: Vec::new(),
        }
    }
}

impl LedgerDocument {
    /// Next free id, never reusing one already present in the document
    fn allocate_id(&mut self) -> i64 {
        let max_existing = self
            .transactions
            .iter()
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(max_existing + 1);
        self.next_id = id + 1;
        id
    }
}

/// Store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the given document path (the file may not exist yet)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing document
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> LedgerResult<LedgerDocument> {
        let doc: LedgerDocument = read_document(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = doc.transactions.len(),
            budgets = doc.budgets.len(),
            "loaded ledger document"
        );
        Ok(doc)
    }

    fn save(&self, doc: &LedgerDocument) -> LedgerResult<()> {
        write_document_atomic(&self.path, doc)
    }
}

impl LedgerStore for JsonStore {
    fn load_all_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.load()?
            .transactions
            .into_iter()
            .map(Transaction::from_record)
            .collect()
    }

    fn save_transaction(&self, transaction: &Transaction) -> LedgerResult<Transaction> {
        let mut doc = self.load()?;
        let id = doc.allocate_id();
        let saved = transaction.clone().with_id(id);
        doc.transactions.push(saved.to_record());
        self.save(&doc)?;

        tracing::info!(id, category = %saved.category, "saved transaction");
        Ok(saved)
    }

    fn delete_transaction(&self, id: i64) -> LedgerResult<Option<Transaction>> {
        let mut doc = self.load()?;
        let Some(pos) = doc.transactions.iter().position(|r| r.id == Some(id)) else {
            return Ok(None);
        };

        let removed = Transaction::from_record(doc.transactions[pos].clone())?;
        doc.transactions.remove(pos);
        self.save(&doc)?;

        tracing::info!(id, "deleted transaction");
        Ok(Some(removed))
    }

    fn load_all_budgets(&self) -> LedgerResult<Vec<Budget>> {
        self.load()?
            .budgets
            .into_iter()
            .map(Budget::from_record)
            .collect()
    }

    fn upsert_budget(&self, budget: &Budget) -> LedgerResult<()> {
        let mut doc = self.load()?;
        let record = budget.to_record();

        match doc
            .budgets
            .iter_mut()
            .find(|r| r.category.as_deref() == Some(budget.category.as_str()))
        {
            Some(existing) => *existing = record,
            None => doc.budgets.push(record),
        }

        self.save(&doc)?;
        tracing::info!(category = %budget.category, limit = %budget.limit, "saved budget");
        Ok(())
    }

    fn delete_budget(&self, category: &str) -> LedgerResult<bool> {
        let mut doc = self.load()?;
        let before = doc.budgets.len();
        doc.budgets
            .retain(|r| r.category.as_deref() != Some(category));

        if doc.budgets.len() == before {
            return Ok(false);
        }

        self.save(&doc)?;
        tracing::info!(category, "deleted budget");
        Ok(true)
    }
}
