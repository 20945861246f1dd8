//! Plugin model for the Lattice framework.
//!
//! # Architecture
//!
//! A plugin exists in three forms:
//!
//! - A [`PluginDescriptor`] — the *static, `Copy` handle*: name, metadata,
//!   API version, and a constructor function pointer. This is what a unit
//!   exports, whether from a shared library or an in-process table.
//! - A [`Plugin`] — the *live instance* the constructor returns: the state
//!   object (built from the manager's shared [`PluginContext`]) plus the
//!   ordered binding table of event listeners bound to that state.
//! - The state type itself — plain user code, unaware of the framework
//!   beyond its constructor signature and listener methods.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lattice_framework::{define_plugin, plugin::PluginDescriptor};
//! use lattice_core::{BoxError, EventArgs, PluginContext};
//!
//! struct Counter {
//!     hits: std::sync::atomic::AtomicU64,
//! }
//!
//! impl Counter {
//!     fn build(_: &PluginContext) -> Result<Self, BoxError> {
//!         Ok(Self { hits: Default::default() })
//!     }
//!
//!     fn on_hit(&self, _: &EventArgs) -> Result<(), BoxError> {
//!         self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//!
//! pub static COUNTER: PluginDescriptor = define_plugin! {
//!     name: "counter",
//!     state: Counter,
//!     build: Counter::build,
//!     listeners: ["on_hit" => Counter::on_hit],
//! };
//! ```
//!
//! [`PluginContext`]: lattice_core::PluginContext

// ─── Submodules ──────────────────────────────────────────────────────────────
pub mod core;
pub mod descriptor;
pub mod macros;

// ─── Re-exports from submodules ──────────────────────────────────────────────
pub use core::{EventBinding, Plugin, PluginMetadata};
pub use descriptor::{LATTICE_PLUGIN_API_VERSION, PluginDescriptor};
