//! Validation utilities for configuration values

use chrono::format::{Item, StrftimeItems};
use validator::ValidationError;

/// Validate a log level string
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays legal for Windows drive letters (C:\).
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Validate an strftime date format string
pub fn validate_date_format(format: &str) -> Result<(), ValidationError> {
    if format.trim().is_empty() {
        return Err(ValidationError::new("empty_date_format"));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ValidationError::new("invalid_date_format"));
    }

    Ok(())
}
