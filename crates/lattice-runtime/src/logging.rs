//! Logging utilities for the Lattice runtime.
//!
//! This module provides a unified logging setup using `tracing` and
//! `tracing-subscriber`, driven by the `[logging]` configuration section.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use lattice_runtime::{config, logging};
//!
//! let config = config::load_config()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! A `RUST_LOG` environment variable, when set, takes precedence over the
//! configured level — the standard escape hatch for one-off debugging.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Safe to call more than once: if a global subscriber is already installed
/// (e.g. by a test harness or the embedding application), the call is a
/// no-op.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = try_init(config);
}

/// Initialize logging, surfacing the error when a global subscriber is
/// already installed.
pub fn try_init(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let writer = make_writer(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
}

/// Builds the writer for the configured output destination.
///
/// `File` output appends to the configured path via a non-rolling appender;
/// a missing `file_path` falls back to stdout (validation normally rejects
/// that combination before we get here).
fn make_writer(config: &LoggingConfig) -> BoxMakeWriter {
    match config.output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => match &config.file_path {
            Some(path) => {
                let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "lattice.log".to_string());
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, file_name))
            }
            None => BoxMakeWriter::new(std::io::stdout),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig::default();
        init_from_config(&config);
        init_from_config(&config);
    }

    #[test]
    fn test_file_writer_uses_configured_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LoggingConfig {
            output: LogOutput::File,
            file_path: Some(dir.path().join("lattice.log")),
            ..Default::default()
        };
        let _writer = make_writer(&config);
    }
}
