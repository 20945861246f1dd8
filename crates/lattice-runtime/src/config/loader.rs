//! Configuration loader using figment.
//!
//! Sources are layered, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. Configuration file (`lattice.toml` / `config.toml`, searched in the
//!    current directory and the user config directory, or an explicit path)
//! 3. Environment variables (`LATTICE_*`)
//! 4. Programmatic overrides via [`ConfigLoader::merge`]
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `LATTICE_` prefix with `__` as the nesting
//! separator:
//!
//! - `LATTICE_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `LATTICE_EVENTS__STRICT=false` → `events.strict = false`
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_runtime::config::ConfigLoader;
//!
//! // Simple loading from default locations
//! let config = ConfigLoader::new().load()?;
//!
//! // Load from a specific file without env overrides
//! let config = ConfigLoader::new()
//!     .file("./config/lattice.toml")
//!     .without_env()
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::LatticeConfig;

/// Base file names searched for in each search path.
const CONFIG_FILE_NAMES: &[&str] = &["lattice.toml", "config.toml"];

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// User-supplied overrides, merged above file and defaults.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically, above files and
    /// defaults.
    pub fn merge(mut self, config: LatticeConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<LatticeConfig> {
        let figment = self.build_figment()?;

        let config: LatticeConfig = figment
            .extract()
            .map_err(|e| ConfigError::Parse(format!("Failed to extract configuration: {e}")))?;

        debug!(
            logging_level = %config.logging.level,
            plugin_groups = config.plugins.len(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        // Start with defaults
        let mut figment = Figment::from(Serialized::defaults(LatticeConfig::default()));

        // Load config files
        if let Some(path) = self.config_file.take() {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Toml::file(path));
        } else {
            figment = self.search_config_files(figment);
        }

        // Merge user's pre-configured overrides
        figment = figment.merge(std::mem::take(&mut self.figment));

        // Load environment variables
        if self.load_env {
            trace!("Loading environment variables with LATTICE_ prefix");
            figment = figment.merge(Env::prefixed("LATTICE_").split("__"));
        }

        Ok(figment)
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("lattice"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches the search paths and merges the first config file found.
    fn search_config_files(&self, mut figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            for base_name in CONFIG_FILE_NAMES {
                let path = search_path.join(base_name);
                if path.exists() {
                    info!(path = %path.display(), "Loading configuration file");
                    return figment.merge(Toml::file(path));
                }
            }
        }
        warn!("No configuration file found, using defaults");
        figment
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<LatticeConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file, with env overrides applied.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<LatticeConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================
