//! # Lattice Runtime
//!
//! Orchestration layer for the Lattice extensibility framework.
//!
//! This crate provides:
//! - TOML + environment configuration loading and validation (`config`)
//! - Configuration-driven logging setup (`logging`)
//! - [`LatticeRuntime`]: the config-driven host object that builds the
//!   shared event registry, assembles one plugin manager per configured
//!   group, and exposes load and dispatch entry points
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_core::EventArgs;
//! use lattice_runtime::LatticeRuntime;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads lattice.toml / LATTICE_* env, sets up logging.
//!     let mut runtime = LatticeRuntime::builder().build()?;
//!     runtime.load_all()?;
//!     runtime.emit("on_start", &EventArgs::empty())?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod logging;

pub use config::{ConfigLoader, LatticeConfig, load_config, load_config_from_file};
pub use error::{HostError, HostResult};
pub use host::{LatticeRuntime, LatticeRuntimeBuilder, LoaderFactory};
