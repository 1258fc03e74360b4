//! Storage layer for budgetmgr
//!
//! Persistence goes through the [`LedgerStore`] trait, implemented by a JSON
//! document store and a SQLite store. [`Storage`] picks one from the
//! configured backend and is what services borrow.

pub mod file_io;
pub mod json;
pub mod sqlite;

pub use file_io::{read_document, write_document_atomic};
pub use json::JsonStore;
pub use sqlite::SqliteStore;

use crate::config::paths::BudgetPaths;
use crate::config::settings::StorageBackend;
use crate::error::LedgerResult;
use crate::models::{Budget, Transaction};

/// Persistence contract shared by every backend
pub trait LedgerStore {
    /// Load every stored transaction, in insertion order
    fn load_all_transactions(&self) -> LedgerResult<Vec<Transaction>>;

    /// Persist a new transaction and return it with its assigned id
    fn save_transaction(&self, transaction: &Transaction) -> LedgerResult<Transaction>;

    /// Delete a transaction by id, returning it if it existed
    fn delete_transaction(&self, id: i64) -> LedgerResult<Option<Transaction>>;

    /// Load every stored budget
    fn load_all_budgets(&self) -> LedgerResult<Vec<Budget>>;

    /// Insert a budget, or overwrite the limit if the category already has one
    fn upsert_budget(&self, budget: &Budget) -> LedgerResult<()>;

    /// Delete the budget for a category, returning whether one existed
    fn delete_budget(&self, category: &str) -> LedgerResult<bool>;
}

/// Main storage coordinator: the active store plus the paths it lives under
pub struct Storage {
    paths: BudgetPaths,
    backend: StorageBackend,
    store: Box<dyn LedgerStore>,
}

impl Storage {
    /// Open the store for the given backend, creating directories as needed
    pub fn new(paths: BudgetPaths, backend: StorageBackend) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let store: Box<dyn LedgerStore> = match backend {
            StorageBackend::Json => Box::new(JsonStore::new(paths.ledger_file())),
            StorageBackend::Sqlite => Box::new(SqliteStore::open(paths.database_file())?),
        };
        tracing::debug!(%backend, base = %paths.base_dir().display(), "opened storage");

        Ok(Self {
            paths,
            backend,
            store,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Which backend is active
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// The active store
    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    /// Check if storage has been initialized (settings were saved)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
