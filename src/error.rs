//! Custom error types for budgetmgr
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for budgetmgr operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Timestamp components do not form a real calendar date/time
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Timestamp string is not valid ISO-8601
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    /// Transaction record could not be turned into a transaction
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Budget record could not be turned into a budget
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Month outside 1..=12
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Report range whose start is after its end
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create an error for a sum that no longer fits in a `Decimal`
    pub fn amount_overflow() -> Self {
        Self::Validation("amount overflow".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for budgetmgr operations
pub type LedgerResult<T> = Result<T, LedgerError>;
