//! Budget CLI commands
//!
//! Per-category spending limits and how the current spending compares.

use clap::Subcommand;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::display::{format_budget_list, format_budget_status};
use crate::error::{LedgerError, LedgerResult};
use crate::reports::ReportPeriod;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit for a category (replaces an existing limit)
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "100" or "250.00")
        #[arg(allow_negative_numbers = true)]
        limit: String,
    },

    /// List all budgets
    #[command(alias = "ls")]
    List,

    /// Remove the budget for a category
    #[command(alias = "rm")]
    Remove {
        /// Category name
        category: String,
    },

    /// Show spending against each budget
    Status {
        /// Period ("2025-01", "2025" or "2025-01-01..2025-03-31"), defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> LedgerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let limit = Decimal::from_str(limit.trim()).map_err(|_| {
                LedgerError::InvalidBudget(format!("invalid limit: {}", limit))
            })?;
            let budget = service.set(&category, limit)?;
            println!("Budget set: {}", budget);
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list()?));
        }

        BudgetCommands::Remove { category } => {
            service.remove(&category)?;
            println!("Removed budget for '{}'", category);
        }

        BudgetCommands::Status { period } => {
            let period = match period {
                Some(p) => ReportPeriod::parse(&p)?,
                None => ReportPeriod::current_month(),
            };
            print!("{}", format_budget_status(&service.status(&period)?));
        }
    }

    Ok(())
}
