//! Error types and utilities for callboard

use thiserror::Error;

/// Result type alias for callboard operations
pub type Result<T> = std::result::Result<T, CallboardError>;

/// Main error type for callboard operations
#[derive(Error, Debug)]
pub enum CallboardError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fatal CSV ingestion errors (corrupt source data)
    #[error("Ingest error: {message}")]
    Ingest {
        /// Description of the malformed value, including the row it came from
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid value
        message: String,
        /// Name of the offending field, if known
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Error message
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CallboardError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new ingest error
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new ingest error with source
    pub fn ingest_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Ingest {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new ingest error pointing at a 1-based CSV record number
    pub fn ingest_at_row(row: u64, msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: format!("row {}: {}", row, msg.into()),
            source: None,
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}
