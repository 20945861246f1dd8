//! # Lattice
//!
//! Runtime plugin loading and named-event dispatch for extensible Rust
//! applications.
//!
//! ## Overview
//!
//! Lattice lets a host application extend itself at runtime: plugin units
//! are discovered under a directory, instantiated with an explicit shared
//! context, and their declared listeners are wired into a named-event
//! registry with ordered synchronous dispatch. Components communicate
//! through events without holding references to each other.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  list/load   ┌───────────────┐  register    ┌───────────────┐
//! │  UnitLoader   │─────────────▶│ PluginManager │─────────────▶│ EventRegistry │
//! │ (dylib/static)│              │  (per group)  │  bindings    │   (shared)    │
//! └───────────────┘              └───────────────┘              └───────┬───────┘
//!                                                                       │ call
//!                                        host listeners + plugin listeners, in
//!                                        registration order, on the caller's thread
//! ```
//!
//! - **EventRegistry**: named-event declaration, ordered listener lists,
//!   strict-mode name validation, synchronous dispatch
//! - **PluginManager**: discovery → load → instantiate → context-inject →
//!   event auto-register, with per-unit failure isolation
//! - **Loaders**: the code-loading substrate — shared libraries or an
//!   in-process unit table
//! - **Runtime**: config-driven assembly of all of the above
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lattice::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // lattice.toml declares events and plugin directories.
//!     let mut runtime = LatticeRuntime::builder().build()?;
//!
//!     for (group, report) in runtime.load_all()? {
//!         for failure in &report.failures {
//!             eprintln!("[{group}] {}: {}", failure.handle, failure.error);
//!         }
//!     }
//!
//!     runtime.emit("on_start", &EventArgs::empty())?;
//!     Ok(())
//! }
//! ```

pub use lattice_core as core;
pub use lattice_framework as framework;
pub use lattice_loader as loader;
pub use lattice_runtime as runtime;

/// Prelude module for convenient imports.
///
/// This module provides all commonly used types for building extensible
/// applications:
///
/// ```rust,ignore
/// use lattice::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use lattice_runtime::{LatticeConfig, LatticeRuntime, load_config};

    // Event system
    pub use lattice_core::{
        BoxError, EventArgs, EventError, EventRegistry, ListenerToken, PluginContext,
    };

    // Plugin model - descriptors, live plugins, load orchestration
    pub use lattice_framework::{
        LoadReport, PluginDescriptor, PluginManager, PluginMetadata, UnitHandle, UnitLoader,
        define_plugin,
    };

    // Substrates
    pub use lattice_loader::{DylibLoader, StaticLoader, export_unit};
}
