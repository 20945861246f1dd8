//! # Lattice Loader
//!
//! Unit-loading substrates for the Lattice extensibility framework.
//!
//! The framework consumes plugin code through the
//! [`UnitLoader`](lattice_framework::UnitLoader) seam; this crate provides
//! the two standard implementations:
//!
//! - [`DylibLoader`] — one shared library per unit, discovered under a load
//!   path and opened with `libloading`. Plugin crates export their
//!   descriptor table with [`export_unit!`].
//! - [`StaticLoader`] — an in-process table of units, for plugins compiled
//!   into the host and for tests.
//!
//! Both substrates enumerate units in lexical name order, so plugin load
//! order — and with it event-listener call order — is reproducible for a
//! fixed unit set.

pub mod dylib;
pub mod static_units;

pub use dylib::{DylibLoader, UNIT_ENTRY_SYMBOL, UnitEntry, UnitEntryFn};
pub use static_units::StaticLoader;

// Re-exported for the export_unit! macro's expansion.
pub use lattice_framework::{LATTICE_PLUGIN_API_VERSION, PluginDescriptor};
