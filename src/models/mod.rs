//! Core data models for budgetmgr
//!
//! This module contains the value types of the ledger domain: timestamps,
//! transactions and per-category budgets.

pub mod budget;
pub mod timestamp;
pub mod transaction;

pub use budget::{Budget, BudgetRecord};
pub use timestamp::Timestamp;
pub use transaction::{
    amount_diff, amount_sum, checked_total, parse_amount, Transaction, TransactionRecord,
};
