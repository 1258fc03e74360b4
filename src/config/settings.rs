//! User settings for budgetmgr
//!
//! Manages user preferences: which storage backend to use and how charts and
//! tables are rendered.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::paths::BudgetPaths;
use crate::error::LedgerError;
use crate::models::Timestamp;

/// Where transactions and budgets are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single JSON document (default)
    #[default]
    Json,
    /// SQLite database file
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// User settings for budgetmgr
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Storage backend
    #[serde(default)]
    pub storage_backend: StorageBackend,

    /// Width of the longest bar in category charts
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Timestamp format for table display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_chart_width() -> usize {
    40
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            storage_backend: StorageBackend::default(),
            chart_width: default_chart_width(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), LedgerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values that would break rendering later
    pub fn validate(&self) -> Result<(), LedgerError> {
        Timestamp::from_ymd(2000, 1, 1)?
            .try_format(&self.date_format)
            .map_err(|_| {
                LedgerError::Config(format!("Invalid date_format: {:?}", self.date_format))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.storage_backend, StorageBackend::Json);
        assert_eq!(settings.chart_width, 40);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.storage_backend = StorageBackend::Sqlite;
        settings.chart_width = 20;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.storage_backend, StorageBackend::Sqlite);
        assert_eq!(loaded.chart_width, 20);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"storage_backend": "sqlite"}"#).unwrap();
        assert_eq!(settings.storage_backend, StorageBackend::Sqlite);
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_corrupt_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_bad_date_format_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Y-%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
        assert!(err.to_string().contains("%Y-%Q"));
    }

    #[test]
    fn test_save_rejects_bad_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_format = "%H:%M %z".into();

        assert!(matches!(settings.save(&paths), Err(LedgerError::Config(_))));
        assert!(!paths.settings_file().exists());
    }
}
