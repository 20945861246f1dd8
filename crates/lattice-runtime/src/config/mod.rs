//! Configuration module for the Lattice runtime.
//!
//! This module provides TOML-based configuration loading and validation for
//! the event registry, plugin groups, and logging.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config, load_config_from_file};
pub use schema::{
    EventsConfig, LatticeConfig, LogFormat, LogOutput, LoggingConfig, PluginGroupConfig,
};
pub use validation::validate_config;
