//! Configuration management for the Elidune store

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the three table files
    pub data_dir: PathBuf,
    pub books_file: String,
    pub students_file: String,
    pub rentals_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty`, `json` or `compact`
    pub format: String,
}

/// Output style of the log formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LoggingConfig {
    /// Parsed `format`; unknown values fall back to compact output
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorageConfig {
    /// Storage rooted at `data_dir` with the default file names
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(&self.students_file)
    }

    pub fn rentals_path(&self) -> PathBuf {
        self.data_dir.join(&self.rentals_file)
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ELIDUNE_), e.g. ELIDUNE_LOGGING__LEVEL
            .add_source(
                Environment::with_prefix("ELIDUNE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override data directory from ELIDUNE_DATA_DIR if present
            .set_override_option("storage.data_dir", env::var("ELIDUNE_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            books_file: "library_data.txt".to_string(),
            students_file: "students.txt".to_string(),
            rentals_file: "rentals.txt".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
