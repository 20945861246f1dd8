//! Configuration validation utilities.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LatticeConfig, LogOutput, PluginGroupConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &LatticeConfig) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_events(config)?;
    validate_groups(&config.plugins)?;
    Ok(())
}

fn validate_logging(config: &LatticeConfig) -> ConfigResult<()> {
    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
        return Err(ConfigError::validation(format!(
            "Invalid log level: {}. Valid values are: {:?}",
            config.logging.level, valid_log_levels
        )));
    }

    if config.logging.output == LogOutput::File && config.logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.output = \"file\" requires logging.file_path",
        ));
    }

    Ok(())
}

fn validate_events(config: &LatticeConfig) -> ConfigResult<()> {
    for name in &config.events.declare {
        if name.trim().is_empty() {
            return Err(ConfigError::validation(
                "Declared event names must not be empty",
            ));
        }
    }
    Ok(())
}

fn validate_groups(groups: &[PluginGroupConfig]) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for group in groups {
        if group.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "Plugin group names must not be empty",
            ));
        }
        if group.path.as_os_str().is_empty() {
            return Err(ConfigError::validation(format!(
                "Plugin group '{}' has an empty load path",
                group.name
            )));
        }
        if !seen.insert(group.name.as_str()) {
            return Err(ConfigError::DuplicateGroup(group.name.clone()));
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> PluginGroupConfig {
        PluginGroupConfig {
            name: name.to_string(),
            path: "plugins".into(),
            enabled: true,
            context: Default::default(),
        }
    }

    #[test]
    fn test_validate_empty_config() {
        let config = LatticeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = LatticeConfig::default();
        config.logging.level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_file_output_requires_path() {
        let mut config = LatticeConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some("lattice.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_event_name() {
        let mut config = LatticeConfig::default();
        config.events.declare = vec!["on_ok".to_string(), "  ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_duplicate_group_name() {
        let mut config = LatticeConfig::default();
        config.plugins = vec![group("Plugin"), group("Plugin")];
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::DuplicateGroup(_))));
    }

    #[test]
    fn test_validate_empty_group_path() {
        let mut config = LatticeConfig::default();
        let mut bad = group("Plugin");
        bad.path = "".into();
        config.plugins = vec![bad];
        assert!(validate_config(&config).is_err());
    }
}
