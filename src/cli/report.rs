//! Report CLI commands
//!
//! Balance, period summaries with optional CSV export, and category charts.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_chart, format_summary};
use crate::error::LedgerResult;
use crate::ledger::Ledger;
use crate::reports::{export_summary_csv, summarize, CategoryBreakdown, ReportPeriod, Summary};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Overall balance, income and expenses
    Balance,

    /// Income/expense summary for a month, year or range
    Summary {
        /// "2025-01", "2025" or "2025-01-01..2025-03-31"
        #[arg(short, long)]
        period: String,
        /// Also write the summary as CSV to this file (a bare file name goes
        /// into the export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// ASCII bar charts of income and expenses per category
    Chart {
        /// Limit to a period (defaults to all transactions)
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let ledger: Ledger = storage
        .store()
        .load_all_transactions()?
        .into_iter()
        .collect();

    match cmd {
        ReportCommands::Balance => {
            print!("{}", format_summary("Overall", &Summary::of(&ledger)?));
        }

        ReportCommands::Summary { period, output } => {
            let period = ReportPeriod::parse(&period)?;
            let summary = summarize(&ledger, &period)?;
            print!("{}", format_summary(&format!("Summary for {}", period), &summary));

            if let Some(path) = output {
                let target = storage.paths().resolve_export_path(&path);
                let written = export_summary_csv(&summary, target)?;
                println!();
                println!("Summary exported to: {}", written.display());
            }
        }

        ReportCommands::Chart { period } => {
            let breakdown = match period {
                Some(p) => {
                    let (start, end) = ReportPeriod::parse(&p)?.bounds()?;
                    CategoryBreakdown::generate(&ledger, start, end)?
                }
                None => CategoryBreakdown::from_ledger(&ledger)?,
            };
            print!("{}", format_category_chart(&breakdown, settings.chart_width));
        }
    }

    Ok(())
}
