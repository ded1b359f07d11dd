//! Structured logging infrastructure for callboard

use std::io;
use std::sync::Arc;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace")
    pub level: String,
    /// Whether to use the compact single-line format instead of pretty output
    pub compact_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            compact_format: false,
            file_path: None,
            include_spans: true,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match (config.compact_format, config.file_path) {
        (true, Some(file_path)) => {
            let file = Arc::new(open_log_file(&file_path)?);
            let layer = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets)
                .with_ansi(false)
                .with_writer(file)
                .compact();
            registry.with(layer).init();
        }
        (true, None) => {
            let layer = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets)
                .with_writer(io::stderr)
                .compact();
            registry.with(layer).init();
        }
        (false, Some(file_path)) => {
            let file = Arc::new(open_log_file(&file_path)?);
            let layer = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets)
                .with_ansi(false)
                .with_writer(file);
            registry.with(layer).init();
        }
        (false, None) => {
            let layer = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets)
                .with_writer(io::stderr);
            registry.with(layer).init();
        }
    }

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::default())
}

fn open_log_file(path: &str) -> io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.compact_format);
        assert!(config.file_path.is_none());
        assert!(config.include_spans);
        assert!(config.include_targets);
    }
}
