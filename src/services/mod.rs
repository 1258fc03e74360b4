//! Service layer for budgetmgr
//!
//! The service layer sits between the adapters and the store, handling
//! validation and keeping the in-memory ledger consistent with storage.

pub mod budget;
pub mod transaction;

pub use budget::BudgetService;
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
