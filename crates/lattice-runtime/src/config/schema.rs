//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LatticeConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Event registry settings.
    #[serde(default)]
    pub events: EventsConfig,

    /// Plugin group configurations, one per managed load path.
    #[serde(default)]
    pub plugins: Vec<PluginGroupConfig>,
}

// =============================================================================
// Logging
// =============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line, terse output.
    #[default]
    Compact,
    /// Multi-line, human-oriented output.
    Pretty,
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Write to standard output.
    #[default]
    Stdout,
    /// Write to standard error.
    Stderr,
    /// Append to the file named by `file_path`.
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, used when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// =============================================================================
// Events
// =============================================================================

/// Event registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// When `true` (the default), events must be declared before listeners
    /// can attach or dispatch can run.
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Event names declared at startup.
    #[serde(default)]
    pub declare: Vec<String>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            declare: Vec::new(),
        }
    }
}

fn default_strict() -> bool {
    true
}

// =============================================================================
// Plugin groups
// =============================================================================

/// One managed plugin group: a load path plus the context its plugins see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginGroupConfig {
    /// Diagnostic label for the group.
    pub name: String,

    /// Directory to scan for plugin units.
    pub path: PathBuf,

    /// Disabled groups are skipped entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Named values handed to every plugin constructor of this group.
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}
