//! Application state for the transaction table view

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::Transaction;
use crate::reports::Summary;
use crate::services::TransactionService;
use crate::storage::Storage;

/// Main application state
pub struct App<'a> {
    /// Service holding the loaded ledger
    service: TransactionService<'a>,

    /// User settings
    pub settings: &'a Settings,

    /// Transactions in display (chronological) order
    rows: Vec<Transaction>,

    /// Selected row index
    pub selected: usize,

    /// Message shown in the footer until the next action
    pub status_message: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Load the ledger and build the initial view
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> LedgerResult<Self> {
        let mut app = Self {
            service: TransactionService::load(storage)?,
            settings,
            rows: Vec::new(),
            selected: 0,
            status_message: None,
            should_quit: false,
        };
        app.refresh_rows();
        Ok(app)
    }

    fn refresh_rows(&mut self) {
        self.rows = self
            .service
            .ledger()
            .sorted_by_timestamp()
            .into_iter()
            .cloned()
            .collect();
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    /// Rows in display order
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Income/expenses/balance of the whole ledger
    pub fn summary(&self) -> LedgerResult<Summary> {
        Summary::of(self.service.ledger())
    }

    /// Currently highlighted transaction
    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.rows.get(self.selected)
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Delete the highlighted transaction through the service
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_transaction().and_then(|t| t.id) else {
            self.status_message = Some("Nothing to delete".into());
            return;
        };

        self.status_message = Some(match self.service.remove(id) {
            Ok(removed) => format!("Deleted transaction {} ({})", id, removed.category),
            Err(e) => e.to_string(),
        });
        self.refresh_rows();
    }

    /// Re-read transactions from storage
    pub fn reload(&mut self) {
        self.status_message = Some(match self.service.reload() {
            Ok(()) => format!("Reloaded {} transactions", self.service.ledger().len()),
            Err(e) => e.to_string(),
        });
        self.refresh_rows();
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
