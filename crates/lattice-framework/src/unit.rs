//! The unit-loading substrate seam.
//!
//! The framework does not know how plugin code gets into the process — a
//! shared library, an in-process table, anything else. It consumes exactly
//! two capabilities through [`UnitLoader`]: enumerate the unit handles under
//! a load path, and turn one handle into a loaded [`Unit`] exposing its
//! plugin descriptors. Concrete substrates live in `lattice-loader`.

use std::any::Any;
use std::path::{Path, PathBuf};

use crate::error::PluginResult;
use crate::plugin::PluginDescriptor;

// ─── UnitHandle ───────────────────────────────────────────────────────────────

/// Identifier of one discoverable plugin unit.
///
/// Carries the unit's name (the identity used for ordering and diagnostics)
/// and the path it was discovered at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitHandle {
    name: String,
    path: PathBuf,
}

impl UnitHandle {
    /// Creates a handle for a unit named `name` at `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The unit's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path the unit was discovered at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for UnitHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ─── Unit ─────────────────────────────────────────────────────────────────────

/// One loaded plugin unit: the descriptors it exports plus whatever backing
/// resource must stay alive while its plugins run.
///
/// The keepalive slot exists for substrates whose loaded code lives inside an
/// owned resource — a dylib substrate parks its `Library` there so the
/// instantiated plugin (and the listeners bound to it) never outlive the
/// mapped code.
pub struct Unit {
    descriptors: Vec<PluginDescriptor>,
    _keepalive: Option<Box<dyn Any + Send + Sync>>,
}

impl Unit {
    /// Creates a unit from its exported descriptors.
    pub fn new(descriptors: Vec<PluginDescriptor>) -> Self {
        Self {
            descriptors,
            _keepalive: None,
        }
    }

    /// Creates a unit whose descriptors are backed by `resource`; the
    /// resource is dropped together with the unit.
    pub fn with_keepalive(
        descriptors: Vec<PluginDescriptor>,
        resource: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            descriptors,
            _keepalive: Some(resource),
        }
    }

    /// The descriptors this unit exports.
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.descriptors
    }
}

impl std::fmt::Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("descriptors", &self.descriptors.len())
            .field("has_keepalive", &self._keepalive.is_some())
            .finish()
    }
}

// ─── UnitLoader ───────────────────────────────────────────────────────────────

/// The code-loading capability the framework consumes.
///
/// Implementations must return handles from [`list_units`] in lexical name
/// order: for a fixed directory snapshot, two enumerations yield the same
/// sequence, which keeps plugin load order — and therefore event-listener
/// call order — reproducible across runs.
///
/// [`list_units`]: UnitLoader::list_units
pub trait UnitLoader: Send + Sync {
    /// Enumerates the candidate units under `dir`.
    fn list_units(&self, dir: &Path) -> PluginResult<Vec<UnitHandle>>;

    /// Loads one unit, yielding its exported descriptors.
    fn load_unit(&self, handle: &UnitHandle) -> PluginResult<Unit>;
}
