use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetmgr::cli::{
    handle_budget_command, handle_report_command, handle_transaction_command, BudgetCommands,
    ReportCommands, TransactionCommands,
};
use budgetmgr::config::{BudgetPaths, Settings, StorageBackend};
use budgetmgr::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetmgr",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "budgetmgr records income and expense transactions, tracks \
                  per-category budgets and summarizes your finances by month, \
                  year or date range."
)]
struct Cli {
    /// Directory holding config and data (defaults to the platform config dir)
    #[arg(long, global = true, env = "BUDGETMGR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage backend, overriding the saved setting
    #[arg(long, global = true, value_enum)]
    backend: Option<StorageBackend>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and save default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Balance, summaries and charts
    #[command(subcommand)]
    Report(ReportCommands),

    /// Launch the interactive transaction table
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    budgetmgr::init_tracing(cli.verbose);

    let paths = BudgetPaths::new(cli.data_dir)?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(backend) = cli.backend {
        settings.storage_backend = backend;
    }

    let storage = Storage::new(paths.clone(), settings.storage_backend)?;

    match cli.command {
        Commands::Init => {
            let already = paths.is_initialized();
            settings.save(&paths)?;
            if already {
                println!("Settings updated at: {}", paths.settings_file().display());
            } else {
                println!("Initialized budgetmgr at: {}", paths.base_dir().display());
            }
            println!("Storage backend: {}", settings.storage_backend);
        }
        Commands::Config => {
            println!("budgetmgr Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Storage backend:  {}", settings.storage_backend);
            match settings.storage_backend {
                StorageBackend::Json => {
                    println!("Ledger file:      {}", paths.ledger_file().display())
                }
                StorageBackend::Sqlite => {
                    println!("Database file:    {}", paths.database_file().display())
                }
            }
            println!("Chart width:      {}", settings.chart_width);
            println!("Date format:      {}", settings.date_format);
            if !paths.is_initialized() {
                println!();
                println!("Not initialized yet. Run 'budgetmgr init' to save these settings.");
            }
        }
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Tui => budgetmgr::tui::run_tui(&storage, &settings)?,
    }

    Ok(())
}
