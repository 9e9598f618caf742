use crate::errors::{ProteinError, ProteinResult, ProteinResultExt};
use crate::types::ChartWidth;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default database location, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "proteins.db";

/// Top-level configuration, built once at startup and handed to the store and handlers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage settings
    pub store: StoreConfig,
    /// Report rendering settings
    pub display: DisplayConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database path
    pub db_path: PathBuf,
    /// Create the database on first open
    pub create_if_missing: bool,
    /// Upper bound on open files held by RocksDB (None = RocksDB default)
    pub max_open_files: Option<i32>,
}

/// Rendering-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width in characters of the longest bar in the residue chart
    pub chart_width: ChartWidth,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            create_if_missing: true,
            max_open_files: None,
        }
    }
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(db_path: P) -> Self {
        Self { db_path: db_path.into(), ..Self::default() }
    }

    /// Validate the storage settings
    pub fn validate(&self) -> ProteinResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ProteinError::ConfigurationError {
                field: "db_path".to_string(),
                message: "Database path must not be empty".to_string(),
            });
        }

        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ProteinError::ConfigurationError {
                    field: "db_path".to_string(),
                    message: format!("Database directory does not exist: {:?}", parent),
                });
            }
        }

        if let Some(max_open_files) = self.max_open_files {
            if max_open_files <= 0 {
                return Err(ProteinError::ConfigurationError {
                    field: "max_open_files".to_string(),
                    message: "Maximum open files must be greater than 0".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load a JSON configuration file. Missing sections fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProteinResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_field_context("config", &format!("Cannot parse {}", path.as_ref().display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ProteinResult<()> {
        self.store.validate()?;
        // ChartWidth can be deserialized without going through ChartWidth::new
        ChartWidth::new(self.display.chart_width.get())
            .with_field_context("chart_width", "Invalid chart width")?;
        Ok(())
    }
}

/// Configuration builder for programmatic setups
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self { config: AppConfig::default() }
    }

    /// Start from an existing configuration, e.g. one loaded from file
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Set the database path
    pub fn db_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.store.db_path = path.into();
        self
    }

    /// Set whether a missing database is created
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.store.create_if_missing = create;
        self
    }

    /// Set the maximum number of open files
    pub fn max_open_files(mut self, max_open_files: i32) -> Self {
        self.config.store.max_open_files = Some(max_open_files);
        self
    }

    /// Set the chart width
    pub fn chart_width(mut self, width: usize) -> Self {
        self.config.display.chart_width = ChartWidth(width);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ProteinResult<AppConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
