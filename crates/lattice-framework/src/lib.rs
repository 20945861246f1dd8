//! # Lattice Framework
//!
//! Plugin model and load orchestration for the Lattice extensibility
//! framework.
//!
//! This layer provides:
//! - The plugin model: [`PluginDescriptor`] (static handle), [`Plugin`]
//!   (live instance), and the [`define_plugin!`] binding-table macro
//! - The [`UnitLoader`] substrate seam — "enumerate units, load one" —
//!   behind which any code-loading mechanism can sit
//! - [`PluginManager`]: discovery → load → instantiate → context-inject →
//!   event auto-register orchestration with per-unit failure isolation
//!
//! The framework layer is built on `lattice-core` and re-exports the core
//! types its macro and traits mention, so plugin crates usually depend on
//! this crate alone.
//!
//! [`PluginDescriptor`]: plugin::PluginDescriptor
//! [`Plugin`]: plugin::Plugin
//! [`UnitLoader`]: unit::UnitLoader
//! [`PluginManager`]: manager::PluginManager

pub mod error;
pub mod manager;
pub mod plugin;
pub mod unit;

pub use error::{PluginError, PluginResult};
pub use manager::{LoadFailure, LoadReport, ManagerState, PluginManager, PluginUnit};
pub use plugin::{
    EventBinding, LATTICE_PLUGIN_API_VERSION, Plugin, PluginDescriptor, PluginMetadata,
};
pub use unit::{Unit, UnitHandle, UnitLoader};

// Core types the define_plugin! macro expands to (needed at call sites).
pub use lattice_core::{BoxError, EventArgs, PluginContext, SharedListener};
