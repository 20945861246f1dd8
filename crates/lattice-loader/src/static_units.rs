//! In-process unit substrate.
//!
//! [`StaticLoader`] serves plugin descriptors from a table registered by the
//! host itself — no code loading involved. It exists for plugins compiled
//! into the host binary and for exercising manager behavior in tests, while
//! keeping the exact load semantics (ordering, shape checks, partial
//! failure) of a real substrate.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use lattice_framework::{PluginDescriptor, PluginError, PluginResult, Unit, UnitHandle, UnitLoader};

/// Serves units from an in-memory table of `name → descriptors`.
///
/// `list_units` ignores the directory's existence on disk — the load path is
/// only used to form handle paths — and returns names in lexical order, the
/// same determinism contract as the dylib substrate.
#[derive(Debug, Default)]
pub struct StaticLoader {
    units: HashMap<String, Vec<PluginDescriptor>>,
}

impl StaticLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptors` as the unit named `name`, replacing any
    /// previous registration of that name.
    pub fn with_unit(
        mut self,
        name: impl Into<String>,
        descriptors: Vec<PluginDescriptor>,
    ) -> Self {
        self.insert(name, descriptors);
        self
    }

    /// Registers `descriptors` as the unit named `name`.
    pub fn insert(&mut self, name: impl Into<String>, descriptors: Vec<PluginDescriptor>) {
        let name = name.into();
        debug!(unit = %name, descriptors = descriptors.len(), "Static unit registered");
        self.units.insert(name, descriptors);
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` when no units are registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl UnitLoader for StaticLoader {
    fn list_units(&self, dir: &Path) -> PluginResult<Vec<UnitHandle>> {
        let mut names: Vec<&String> = self.units.keys().collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| UnitHandle::new(name.clone(), dir.join(name)))
            .collect())
    }

    fn load_unit(&self, handle: &UnitHandle) -> PluginResult<Unit> {
        match self.units.get(handle.name()) {
            Some(descriptors) => Ok(Unit::new(descriptors.clone())),
            None => Err(PluginError::UnitLoad {
                unit: handle.name().to_string(),
                source: "unit is not registered with this loader".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lattice_framework::plugin::{LATTICE_PLUGIN_API_VERSION, PluginMetadata};

    fn descriptor(name: &'static str) -> PluginDescriptor {
        PluginDescriptor {
            api_version: LATTICE_PLUGIN_API_VERSION,
            name,
            metadata: PluginMetadata {
                version: "0.0.0",
                desc: "",
            },
            create: |_| Err("test descriptor is not constructible".into()),
        }
    }

    #[test]
    fn test_units_are_listed_in_lexical_order() {
        let loader = StaticLoader::new()
            .with_unit("gamma", vec![descriptor("g")])
            .with_unit("alpha", vec![descriptor("a")])
            .with_unit("beta", vec![descriptor("b")]);

        let handles = loader.list_units(Path::new("plugins")).unwrap();
        let names: Vec<&str> = handles.iter().map(UnitHandle::name).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert_eq!(handles[0].path(), Path::new("plugins/alpha"));
    }

    #[test]
    fn test_load_unit_returns_registered_descriptors() {
        let loader = StaticLoader::new().with_unit("solo", vec![descriptor("solo")]);
        let handle = UnitHandle::new("solo", "plugins/solo");
        let unit = loader.load_unit(&handle).unwrap();
        assert_eq!(unit.descriptors().len(), 1);
        assert_eq!(unit.descriptors()[0].name, "solo");
    }

    #[test]
    fn test_unknown_unit_is_a_load_error() {
        let loader = StaticLoader::new();
        let handle = UnitHandle::new("ghost", "plugins/ghost");
        assert!(matches!(
            loader.load_unit(&handle),
            Err(PluginError::UnitLoad { ref unit, .. }) if unit == "ghost"
        ));
    }

    #[test]
    fn test_reregistering_replaces_the_unit() {
        let mut loader = StaticLoader::new();
        loader.insert("twice", vec![descriptor("first")]);
        loader.insert("twice", vec![descriptor("second")]);

        let unit = loader
            .load_unit(&UnitHandle::new("twice", "plugins/twice"))
            .unwrap();
        assert_eq!(unit.descriptors().len(), 1);
        assert_eq!(unit.descriptors()[0].name, "second");
    }
}
