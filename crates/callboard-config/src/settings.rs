//! Application configuration structures

use callboard_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Data source configuration
    #[validate]
    pub data: DataConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Validates the configuration including every nested section
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

/// Call-record data source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the call-record CSV file
    #[validate(length(min = 1, message = "CSV path cannot be empty"))]
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "CSV path contains invalid characters"
    ))]
    pub csv_path: String,

    /// Optional strftime format for the CSV date column
    /// Example: "%d/%m/%Y"
    #[validate(custom(
        function = "crate::validation::validate_date_format",
        message = "Date format is not a valid strftime pattern"
    ))]
    pub date_format: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "chamadas.csv".to_string(),
            date_format: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// Whether to use the compact single-line log format
    pub compact: bool,

    /// Whether to include span open/close events in the output
    pub include_spans: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            compact: false,
            include_spans: false,
        }
    }
}

impl LoggingSettings {
    /// Maps these settings onto the common logging initializer's config
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            compact_format: self.compact,
            file_path: self.file.clone(),
            include_spans: self.include_spans,
            include_targets: true,
        }
    }
}
