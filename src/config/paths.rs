//! Path management for budgetmgr
//!
//! Provides path resolution for configuration, data files and exports.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (the `--data-dir` flag)
//! 2. `BUDGETMGR_DATA_DIR` environment variable (if set)
//! 3. The platform config directory (`~/.config/budgetmgr` on Linux,
//!    `~/Library/Application Support/budgetmgr` on macOS, `%APPDATA%\budgetmgr`
//!    on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::LedgerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGETMGR_DATA_DIR";

/// Manages all paths used by budgetmgr
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    /// Base directory for all budgetmgr data
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve paths from an optional explicit directory
    ///
    /// # Errors
    ///
    /// Returns an error if no explicit directory is given, the environment
    /// variable is unset and the home directory cannot be determined.
    pub fn new(explicit: Option<PathBuf>) -> Result<Self, LedgerError> {
        let base_dir = match explicit {
            Some(dir) => dir,
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
                _ => resolve_default_path()?,
            },
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (<base>/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Where an export named on the command line is written
    ///
    /// A bare file name lands in the export directory. Anything with a
    /// directory part, or an absolute path, is used as given.
    pub fn resolve_export_path(&self, output: &Path) -> PathBuf {
        let bare_name = output.is_relative()
            && output
                .parent()
                .map_or(true, |parent| parent.as_os_str().is_empty());

        if bare_name {
            self.export_dir().join(output)
        } else {
            output.to_path_buf()
        }
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to ledger.json (JSON backend)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Get the path to budget.db (SQLite backend)
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("budget.db")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if budgetmgr has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory for the current platform
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| LedgerError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budgetmgr"))
}
