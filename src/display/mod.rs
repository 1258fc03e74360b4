//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions, budgets and reports for
//! terminal display.

pub mod report;
pub mod transaction;

pub use report::{
    format_budget_list, format_budget_status, format_category_chart, format_summary,
};
pub use transaction::{format_transaction_details, format_transaction_table};
