//! budgetmgr - Personal finance ledger for the terminal
//!
//! This library records income and expense transactions, keeps per-category
//! spending limits, and summarizes activity over months, years or arbitrary
//! date ranges. Data lives in a JSON document or a SQLite database.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Timestamps, transactions and budgets
//! - `ledger`: In-memory transaction collection with aggregates and filters
//! - `reports`: Period summaries, CSV export, category charts, budget status
//! - `storage`: JSON and SQLite stores behind the `LedgerStore` trait
//! - `services`: Business logic layer
//! - `cli`, `display`, `tui`: Terminal front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetmgr::config::{paths::BudgetPaths, settings::Settings};
//! use budgetmgr::storage::Storage;
//!
//! let paths = BudgetPaths::new(None)?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, settings.storage_backend)?;
//! ```

use std::sync::Once;

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use models::{Budget, Timestamp, Transaction};

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber, logging to stderr
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is true.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let default = if verbose {
            "budgetmgr=debug"
        } else {
            "budgetmgr=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
