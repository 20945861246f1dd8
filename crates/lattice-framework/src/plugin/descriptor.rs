//! Plugin descriptor — the static, `Copy` handle to a plugin.

use lattice_core::{BoxError, PluginContext};

use super::core::{Plugin, PluginMetadata};

// ─── API versioning ───────────────────────────────────────────────────────────

/// Current Lattice plugin API version (1.0).
pub const LATTICE_PLUGIN_API_VERSION: u32 = 0x0001_0000;

// ─── PluginDescriptor ─────────────────────────────────────────────────────────

/// A static, `Copy` descriptor that identifies and instantiates a plugin.
///
/// The descriptor is the "plugin-shaped type" a unit exports: the loader
/// locates exactly one of these per unit, then calls
/// [`instantiate`](Self::instantiate) with the manager's shared context to
/// obtain the live [`Plugin`].
///
/// # Creating descriptors
///
/// Use the [`define_plugin!`] macro — it produces a `PluginDescriptor` that
/// can be stored in a `static` item, exported from a dylib unit, or handed to
/// an in-process unit table.
///
/// # Memory layout
///
/// `PluginDescriptor` is `#[repr(C)]` so it can cross a shared-library
/// boundary. Fields **must not be reordered**.
///
/// [`define_plugin!`]: crate::define_plugin
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    /// Plugin API version this descriptor was compiled against.
    pub api_version: u32,

    /// Plugin name (used in logs and as the duplicate-detection key).
    pub name: &'static str,

    /// Static metadata snapshot for this plugin.
    pub metadata: PluginMetadata,

    /// Constructor: builds the live [`Plugin`] from the shared context.
    pub create: fn(&PluginContext) -> Result<Plugin, BoxError>,
}

impl PluginDescriptor {
    /// Returns `true` if this descriptor's API version is compatible with
    /// the running framework.
    ///
    /// The major part must match exactly; the descriptor's minor part must
    /// be ≤ the host's minor part.
    pub fn is_compatible(&self) -> bool {
        let host_major = LATTICE_PLUGIN_API_VERSION >> 16;
        let host_minor = LATTICE_PLUGIN_API_VERSION & 0xFFFF;
        let desc_major = self.api_version >> 16;
        let desc_minor = self.api_version & 0xFFFF;
        desc_major == host_major && desc_minor <= host_minor
    }

    /// Builds the live plugin, passing the shared context to the
    /// constructor.
    ///
    /// Prefer [`PluginManager::load_all`], which also handles the
    /// compatibility check, shape validation, and event auto-registration.
    ///
    /// [`PluginManager::load_all`]: crate::manager::PluginManager::load_all
    #[inline]
    pub fn instantiate(&self, context: &PluginContext) -> Result<Plugin, BoxError> {
        (self.create)(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_version_is_compatible() {
        let desc = descriptor_with_version(LATTICE_PLUGIN_API_VERSION);
        assert!(desc.is_compatible());
    }

    #[test]
    fn test_newer_minor_is_incompatible() {
        let desc = descriptor_with_version(LATTICE_PLUGIN_API_VERSION + 1);
        assert!(!desc.is_compatible());
    }

    #[test]
    fn test_different_major_is_incompatible() {
        let desc = descriptor_with_version(0x0002_0000);
        assert!(!desc.is_compatible());
    }

    fn descriptor_with_version(api_version: u32) -> PluginDescriptor {
        PluginDescriptor {
            api_version,
            name: "versioned",
            metadata: PluginMetadata {
                version: "0.0.0",
                desc: "",
            },
            create: |_| Err("not constructible".into()),
        }
    }
}
