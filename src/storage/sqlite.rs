//! SQLite store
//!
//! Amounts and timestamps are stored as TEXT so they round-trip exactly
//! through the same record validation as the JSON store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::LedgerStore;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetRecord, Transaction, TransactionRecord};

const SCHEMA_VERSION: i64 = 1;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    category TEXT NOT NULL,
    amount TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_transactions_timestamp ON transactions (timestamp);

CREATE TABLE IF NOT EXISTS budgets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL UNIQUE,
    limit_amount TEXT NOT NULL
);
"#;

/// Store backed by a SQLite database file
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| {
            LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "opened sqlite store");

        Self::with_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> LedgerResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> LedgerResult<Self> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version > SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "Database schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            )));
        }

        conn.execute_batch(SCHEMA)?;
        if version < SCHEMA_VERSION {
            conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
        }

        Ok(Self { conn })
    }
}

fn transaction_record(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        id: Some(row.get(0)?),
        timestamp: Some(row.get(1)?),
        category: Some(row.get(2)?),
        amount: Some(row.get(3)?),
        description: Some(row.get(4)?),
    })
}

impl LedgerStore for SqliteStore {
    fn load_all_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, category, amount, description FROM transactions ORDER BY id",
        )?;
        let records = stmt
            .query_map([], transaction_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(count = records.len(), "loaded transactions from sqlite");
        records.into_iter().map(Transaction::from_record).collect()
    }

    fn save_transaction(&self, transaction: &Transaction) -> LedgerResult<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions (timestamp, category, amount, description) VALUES (?1, ?2, ?3, ?4)",
            params![
                transaction.timestamp.to_iso(),
                transaction.category,
                transaction.amount.to_string(),
                transaction.description,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        tracing::info!(id, category = %transaction.category, "saved transaction");
        Ok(transaction.clone().with_id(id))
    }

    fn delete_transaction(&self, id: i64) -> LedgerResult<Option<Transaction>> {
        let tx = self.conn.unchecked_transaction()?;

        let record = tx
            .query_row(
                "SELECT id, timestamp, category, amount, description FROM transactions WHERE id = ?1",
                params![id],
                transaction_record,
            )
            .optional()?;

        let Some(record) = record else {
            return Ok(None);
        };

        tx.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::info!(id, "deleted transaction");
        Transaction::from_record(record).map(Some)
    }

    fn load_all_budgets(&self) -> LedgerResult<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, limit_amount FROM budgets ORDER BY id")?;
        let records = stmt
            .query_map([], |row| {
                Ok(BudgetRecord {
                    category: Some(row.get(0)?),
                    limit: Some(row.get(1)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        records.into_iter().map(Budget::from_record).collect()
    }

    fn upsert_budget(&self, budget: &Budget) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT INTO budgets (category, limit_amount) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET limit_amount = excluded.limit_amount",
            params![budget.category, budget.limit.to_string()],
        )?;

        tracing::info!(category = %budget.category, limit = %budget.limit, "saved budget");
        Ok(())
    }

    fn delete_budget(&self, category: &str) -> LedgerResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM budgets WHERE category = ?1", params![category])?;

        if deleted > 0 {
            tracing::info!(category, "deleted budget");
        }
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timestamp;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(day: u32, category: &str, amount: &str) -> Transaction {
        Transaction::new(
            Timestamp::from_components(2025, 1, day, 9, 15, 0, 250).unwrap(),
            category,
            dec(amount),
            "coffee",
        )
    }

    #[test]
    fn test_schema_version_is_set() {
        let store = SqliteStore::open_in_memory().unwrap();
        let version: i64 = store
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_load_transactions() {
        let store = SqliteStore::open_in_memory().unwrap();

        let first = store.save_transaction(&txn(10, "salary", "100")).unwrap();
        let second = store.save_transaction(&txn(20, "food", "-40.25")).unwrap();

        assert!(first.id.is_some());
        assert_ne!(first.id, second.id);

        let loaded = store.load_all_transactions().unwrap();
        assert_eq!(loaded, vec![first, second]);
        assert_eq!(loaded[1].timestamp.microsecond(), 250);
    }

    #[test]
    fn test_delete_transaction() {
        let store = SqliteStore::open_in_memory().unwrap();
        let saved = store.save_transaction(&txn(3, "food", "-3")).unwrap();
        let id = saved.id.unwrap();

        assert_eq!(store.delete_transaction(id).unwrap(), Some(saved));
        assert_eq!(store.delete_transaction(id).unwrap(), None);
        assert!(store.load_all_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_budget_upsert_overwrites_limit() {
        let store = SqliteStore::open_in_memory().unwrap();

        store
            .upsert_budget(&Budget::new("food", dec("100")).unwrap())
            .unwrap();
        store
            .upsert_budget(&Budget::new("food", dec("150")).unwrap())
            .unwrap();

        let budgets = store.load_all_budgets().unwrap();
        assert_eq!(budgets, vec![Budget::new("food", dec("150")).unwrap()]);
    }

    #[test]
    fn test_delete_budget() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .upsert_budget(&Budget::new("rent", dec("900")).unwrap())
            .unwrap();

        assert!(store.delete_budget("rent").unwrap());
        assert!(!store.delete_budget("rent").unwrap());
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("budget.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_transaction(&txn(1, "food", "-12.50")).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let loaded = store.load_all_transactions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, dec("-12.50"));
    }

    #[test]
    fn test_malformed_amount_is_invalid_transaction() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO transactions (timestamp, category, amount, description) VALUES ('2025-01-01T00:00:00', 'food', 'lots', '')",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.load_all_transactions(),
            Err(LedgerError::InvalidTransaction(_))
        ));
    }
}
