//! Foundation layer - core abstractions and type system.
//!
//! This module contains the fundamental building blocks of the Lattice
//! framework:
//! - Named-event registry with ordered synchronous dispatch
//! - Type-erased event payloads
//! - The shared context handed to plugin constructors

pub mod args;
pub mod context;
pub mod error;
pub mod registry;

pub use args::EventArgs;
pub use context::{PluginContext, PluginContextBuilder};
pub use error::{BoxError, ContextError, ContextResult, EventError, EventResult};
pub use registry::{EventRegistry, ListenerFn, ListenerToken, SharedListener};
