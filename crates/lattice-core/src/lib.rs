//! # Lattice Core
//!
//! The core engine of the Lattice extensibility framework.
//!
//! This crate provides the fundamental building blocks shared by every other
//! layer: the named-event registry, type-erased event payloads, and the
//! context object through which a host exposes state to its plugins.
//!
//! ## Architecture
//!
//! Lattice separates "who produces an event" from "who reacts to it" through
//! a central [`EventRegistry`]:
//!
//! ```text
//! ┌──────────┐  call(name, args)  ┌───────────────┐  in order  ┌────────────┐
//! │   Host   │───────────────────▶│ EventRegistry │───────────▶│ listener 1 │
//! └──────────┘                    │  (per name,   │───────────▶│ listener 2 │
//!                                 │   ordered)    │───────────▶│ listener n │
//!                                 └───────────────┘            └────────────┘
//! ```
//!
//! Listeners are attached either directly by host code or automatically from
//! the binding tables of loaded plugins (see `lattice-framework`). Dispatch
//! is synchronous and runs on the caller's thread; there is no background
//! scheduling anywhere in the core.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lattice_core::{EventArgs, EventRegistry};
//!
//! let registry = EventRegistry::strict_mode();
//! registry.declare("on_greet");
//! registry.register("on_greet", |args| {
//!     if let Some(name) = args.downcast_ref::<String>() {
//!         println!("hello, {name}");
//!     }
//!     Ok(())
//! })?;
//! registry.call("on_greet", &EventArgs::new("world".to_string()))?;
//! ```

pub mod foundation;

pub use foundation::{
    BoxError, ContextError, ContextResult, EventArgs, EventError, EventRegistry, EventResult,
    ListenerFn, ListenerToken, PluginContext, PluginContextBuilder, SharedListener,
};
