//! Configuration loading utilities

use crate::Config;
use callboard_common::Result as CallboardResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl From<ConfigError> for callboard_common::CallboardError {
    fn from(err: ConfigError) -> Self {
        callboard_common::CallboardError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config);
        config.validate_all()?;

        debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from the default locations
    ///
    /// Resolution order: `CALLBOARD_CONFIG_PATH`, then `callboard.yaml` or
    /// `callboard.yml` in the working directory, then built-in defaults.
    /// Environment overrides apply in every case.
    pub fn load() -> CallboardResult<Config> {
        let config = if let Ok(config_path) = env::var("CALLBOARD_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("callboard.yaml").exists() {
            Self::load_config("callboard.yaml")?
        } else if Path::new("callboard.yml").exists() {
            Self::load_config("callboard.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config);
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CallboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(csv_path) = env::var("CALLBOARD_CSV_PATH") {
            config.data.csv_path = csv_path;
        }

        if let Ok(date_format) = env::var("CALLBOARD_DATE_FORMAT") {
            config.data.date_format = Some(date_format);
        }

        if let Ok(level) = env::var("CALLBOARD_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("CALLBOARD_LOG_FILE") {
            config.logging.file = Some(file);
        }
    }
}
