//! Shared plugin context.
//!
//! A [`PluginContext`] is the read-only bag of named values a host exposes to
//! every plugin instance of one manager. It is built once, then passed
//! explicitly to each plugin constructor — a plugin copies whatever it needs
//! into its own fields while it is being built, so later mutation of its own
//! state never leaks into sibling plugins. Sharing a mutable object across
//! plugins requires putting an explicit handle (e.g. an `Arc`) into the
//! context value itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_core::PluginContext;
//!
//! let ctx = PluginContext::builder()
//!     .insert("app_name", "demo-host")
//!     .insert("max_retries", 3)
//!     .build();
//!
//! assert_eq!(ctx.get_as::<String>("app_name")?, "demo-host");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ContextError, ContextResult};

/// An immutable snapshot of named values shared with plugin constructors.
///
/// Cloning is cheap: all clones refer to the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct PluginContext {
    values: Arc<HashMap<String, Value>>,
}

impl PluginContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a context.
    pub fn builder() -> PluginContextBuilder {
        PluginContextBuilder::default()
    }

    /// Creates a context from an existing map of values.
    pub fn from_map(values: HashMap<String, Value>) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deserializes the value stored under `key` into `T`.
    ///
    /// Returns [`ContextError::Missing`] when the key is absent and
    /// [`ContextError::Deserialize`] when the stored value does not match the
    /// requested shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ContextResult<T> {
        let value = self.get(key).ok_or_else(|| ContextError::Missing {
            key: key.to_string(),
        })?;
        T::deserialize(value).map_err(|source| ContextError::Deserialize {
            key: key.to_string(),
            source,
        })
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over the keys of this context.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of values in this context.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the context holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for PluginContext {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self::from_map(map.into_iter().collect())
    }
}

/// Builder for [`PluginContext`].
#[derive(Debug, Default)]
pub struct PluginContextBuilder {
    values: HashMap<String, Value>,
}

impl PluginContextBuilder {
    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Finalizes the builder into an immutable context.
    pub fn build(self) -> PluginContext {
        PluginContext::from_map(self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_get_as() {
        let ctx = PluginContext::builder()
            .insert("name", "demo")
            .insert("retries", 3)
            .build();

        assert_eq!(ctx.get("name"), Some(&Value::from("demo")));
        assert_eq!(ctx.get_as::<String>("name").unwrap(), "demo");
        assert_eq!(ctx.get_as::<u32>("retries").unwrap(), 3);
    }

    #[test]
    fn test_missing_key() {
        let ctx = PluginContext::new();
        assert!(ctx.get("absent").is_none());
        assert!(matches!(
            ctx.get_as::<String>("absent"),
            Err(ContextError::Missing { key }) if key == "absent"
        ));
    }

    #[test]
    fn test_wrong_shape() {
        let ctx = PluginContext::builder().insert("port", "not-a-number").build();
        assert!(matches!(
            ctx.get_as::<u16>("port"),
            Err(ContextError::Deserialize { key, .. }) if key == "port"
        ));
    }

    #[test]
    fn test_clones_observe_the_same_values() {
        let ctx = PluginContext::builder().insert("shared", true).build();
        let clone = ctx.clone();
        assert_eq!(clone.get_as::<bool>("shared").unwrap(), true);
        assert_eq!(ctx.len(), clone.len());
    }

    #[test]
    fn test_builder_replaces_duplicate_keys() {
        let ctx = PluginContext::builder()
            .insert("k", 1)
            .insert("k", 2)
            .build();
        assert_eq!(ctx.get_as::<i64>("k").unwrap(), 2);
        assert_eq!(ctx.len(), 1);
    }
}
