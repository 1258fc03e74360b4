//! Transaction CLI commands
//!
//! Add, list and remove transactions.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::LedgerResult;
use crate::models::{parse_amount, Timestamp};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Category label
        #[arg(short, long)]
        category: String,
        /// Signed amount (e.g., "1200" income, "-40.50" expense)
        #[arg(short, long, allow_negative_numbers = true)]
        amount: String,
        /// ISO-8601 timestamp (defaults to now)
        #[arg(short, long)]
        timestamp: Option<String>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List transactions in chronological order
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Inclusive start (ISO-8601 or YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive end (a bare date covers the whole day)
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Remove a transaction by ID
    #[command(alias = "rm")]
    Remove {
        /// Transaction ID
        id: i64,
    },
}

/// Parse a range bound; a date-only upper bound extends to the end of that day
fn parse_bound(s: &str, upper: bool) -> LedgerResult<Timestamp> {
    let s = s.trim();
    let ts = Timestamp::from_iso(s)?;
    Ok(if upper && s.len() == 10 { ts.end_of_day() } else { ts })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let mut service = TransactionService::load(storage)?;

    match cmd {
        TransactionCommands::Add {
            category,
            amount,
            timestamp,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let timestamp = timestamp.as_deref().map(Timestamp::from_iso).transpose()?;

            let saved = service.add(CreateTransactionInput {
                category,
                amount,
                timestamp,
                description,
            })?;

            println!("Added transaction:");
            print!("{}", format_transaction_details(&saved));
        }

        TransactionCommands::List {
            category,
            from,
            to,
            limit,
        } => {
            let filter = TransactionFilter {
                category,
                from: from.as_deref().map(|s| parse_bound(s, false)).transpose()?,
                to: to.as_deref().map(|s| parse_bound(s, true)).transpose()?,
                limit,
            };

            let transactions = service.list(&filter)?;
            print!(
                "{}",
                format_transaction_table(&transactions, &settings.date_format)
            );
        }

        TransactionCommands::Remove { id } => {
            let removed = service.remove(id)?;
            println!("Removed transaction: {}", removed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound() {
        let start = parse_bound("2025-01-31", false).unwrap();
        assert_eq!(start.hour(), 0);

        let end = parse_bound("2025-01-31", true).unwrap();
        assert_eq!(end.hour(), 23);
        assert_eq!(end.microsecond(), 999_999);

        let exact = parse_bound("2025-01-31T12:00:00", true).unwrap();
        assert_eq!(exact.hour(), 12);
    }
}
