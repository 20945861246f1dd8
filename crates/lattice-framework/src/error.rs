//! Error types for plugin discovery, loading, and instantiation.
//!
//! Everything except [`PluginError::InvalidDirectory`] is a *per-unit*
//! failure: `load_all` records it and moves on to the remaining units.
//! Listener errors raised during dispatch are a different animal — see
//! [`EventError::Listener`] — and are deliberately not isolated.
//!
//! [`EventError::Listener`]: lattice_core::EventError::Listener

use std::path::PathBuf;

use thiserror::Error;

use lattice_core::{BoxError, EventError};

/// Errors that can occur while loading plugin units.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The load path could not be enumerated. The only error that fails a
    /// whole `load_all` call.
    #[error("plugin directory '{path}' is not valid: {reason}")]
    InvalidDirectory {
        /// The directory that could not be walked.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// A unit failed to load (unreadable file, missing entry symbol,
    /// load-time failure inside the unit).
    #[error("failed to load unit '{unit}': {source}")]
    UnitLoad {
        /// The unit that failed.
        unit: String,
        /// The substrate's error.
        #[source]
        source: BoxError,
    },

    /// A loaded unit exposed zero or multiple plugin descriptors.
    #[error("unit '{unit}' must expose exactly one plugin, found {found}")]
    Shape {
        /// The offending unit.
        unit: String,
        /// Number of descriptors the unit exposed.
        found: usize,
    },

    /// A plugin constructor returned an error.
    #[error("failed to instantiate plugin '{plugin}': {source}")]
    Instantiate {
        /// The plugin being constructed.
        plugin: String,
        /// The constructor's error.
        #[source]
        source: BoxError,
    },

    /// Two units in the same batch produced the same plugin name.
    #[error("plugin '{plugin}' is already loaded")]
    AlreadyLoaded {
        /// The duplicate plugin name.
        plugin: String,
    },

    /// Event auto-registration failed (strict-mode registry, undeclared
    /// binding). None of the unit's listeners are registered in that case.
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
