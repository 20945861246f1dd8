//! Runtime error types.

use thiserror::Error;

use lattice_core::EventError;
use lattice_framework::PluginError;

use crate::config::ConfigError;

/// Errors that can occur during runtime orchestration.
#[derive(Debug, Error)]
pub enum HostError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A plugin manager could not run its load pass at all (per-unit
    /// failures are reported through the load reports instead).
    #[error("plugin group '{group}' failed to load: {source}")]
    Plugin {
        /// The affected plugin group.
        group: String,
        /// The manager's error.
        #[source]
        source: PluginError,
    },

    /// An event operation failed.
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Result type for runtime operations.
pub type HostResult<T> = Result<T, HostError>;
