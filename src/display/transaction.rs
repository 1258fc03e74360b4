//! Transaction display formatting
//!
//! Tabular register view of transactions for terminal display.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, date_format: &str) -> Self {
        Self {
            id: txn.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            timestamp: txn.timestamp.format(date_format),
            category: txn.category.clone(),
            amount: txn.amount.to_string(),
            description: truncate(&txn.description, DESCRIPTION_WIDTH),
        }
    }
}

/// Format transactions as a register table, in the order given
pub fn format_transaction_table(transactions: &[&Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, date_format));

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(3), Alignment::right());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    match txn.id {
        Some(id) => output.push_str(&format!("Transaction: {}\n", id)),
        None => output.push_str("Transaction: (unsaved)\n"),
    }
    output.push_str(&format!("Timestamp:   {}\n", txn.timestamp));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}
