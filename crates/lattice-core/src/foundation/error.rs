//! Unified error types for the Lattice core.
//!
//! This module provides the standardized error types used across core
//! components. Loader- and host-level errors are defined in their own crates.

use thiserror::Error;

/// Type-erased error returned by listeners and plugin constructors.
///
/// Listeners report failures through whatever error type suits them; the
/// registry only needs something it can carry as a `#[source]`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors produced by the event registry.
#[derive(Debug, Error)]
pub enum EventError {
    /// A strict-mode registry was asked to register or dispatch an event
    /// that was never declared.
    #[error("unknown event '{name}' — declare it before use in strict mode")]
    UnknownEvent {
        /// The undeclared event name.
        name: String,
    },

    /// A listener returned an error during dispatch.
    ///
    /// Dispatch of the remaining listeners is aborted; the listener's own
    /// error is preserved as the source.
    #[error("listener failed while dispatching '{event}': {source}")]
    Listener {
        /// The event being dispatched when the listener failed.
        event: String,
        /// The error the listener returned.
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// Context Errors
// =============================================================================

/// Errors produced when reading typed values out of a [`PluginContext`].
///
/// [`PluginContext`]: crate::foundation::context::PluginContext
#[derive(Debug, Error)]
pub enum ContextError {
    /// The requested key is not present in the context.
    #[error("context value '{key}' is missing")]
    Missing {
        /// The absent key.
        key: String,
    },

    /// The value exists but could not be deserialized into the requested type.
    #[error("context value '{key}' has the wrong shape: {source}")]
    Deserialize {
        /// The offending key.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registry operations.
pub type EventResult<T> = Result<T, EventError>;

/// Result type for context reads.
pub type ContextResult<T> = Result<T, ContextError>;
