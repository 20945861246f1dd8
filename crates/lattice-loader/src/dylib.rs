//! Shared-library unit substrate.
//!
//! A dylib unit is one shared library (`.so` / `.dylib` / `.dll`) under the
//! load path that exports the [`UNIT_ENTRY_SYMBOL`] entry point — normally
//! via the [`export_unit!`] macro:
//!
//! ```rust,ignore
//! use lattice_framework::{define_plugin, plugin::PluginDescriptor};
//! use lattice_loader::export_unit;
//!
//! static GREETER: PluginDescriptor = define_plugin! { /* … */ };
//!
//! export_unit!(GREETER);
//! ```
//!
//! # Safety
//!
//! Loading a shared library runs arbitrary code. Only load trusted plugins
//! from directories the host controls.
//!
//! [`export_unit!`]: crate::export_unit

use std::path::Path;

use libloading::{Library, Symbol};
use tracing::{debug, info};

use lattice_framework::{
    LATTICE_PLUGIN_API_VERSION, PluginDescriptor, PluginError, PluginResult, Unit, UnitHandle,
    UnitLoader,
};

// ─── Entry-point contract ─────────────────────────────────────────────────────

/// Name of the entry symbol every dylib unit must export.
pub const UNIT_ENTRY_SYMBOL: &[u8] = b"lattice_unit_entry";

/// `#[repr(C)]` descriptor table returned by a unit's entry symbol.
///
/// Fields **must not be reordered** — the layout is shared between host and
/// unit binaries.
#[repr(C)]
pub struct UnitEntry {
    /// Plugin API version the unit was compiled against.
    pub api_version: u32,
    /// Pointer to the unit's descriptor table (static storage in the unit).
    pub descriptors: *const PluginDescriptor,
    /// Number of descriptors in the table.
    pub len: usize,
}

/// Type of the entry function exported by dylib units.
///
/// Dylib units must export:
/// `extern "C" fn lattice_unit_entry() -> UnitEntry`
pub type UnitEntryFn = unsafe extern "C" fn() -> UnitEntry;

fn is_unit_extension(ext: &str) -> bool {
    matches!(ext, "so" | "dylib" | "dll")
}

// ─── DylibLoader ──────────────────────────────────────────────────────────────

/// Loads plugin units from shared libraries.
///
/// Discovery is deterministic: `list_units` returns one handle per library
/// file directly under the load path, in lexical name order.
#[derive(Debug, Default)]
pub struct DylibLoader;

impl DylibLoader {
    /// Creates a new dylib loader.
    pub fn new() -> Self {
        Self
    }
}

impl UnitLoader for DylibLoader {
    fn list_units(&self, dir: &Path) -> PluginResult<Vec<UnitHandle>> {
        if !dir.is_dir() {
            return Err(PluginError::InvalidDirectory {
                path: dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| PluginError::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut handles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PluginError::InvalidDirectory {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(is_unit_extension);
            if !matches_ext {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                handles.push(UnitHandle::new(stem, &path));
            }
        }

        handles.sort_by(|a, b| a.name().cmp(b.name()));
        debug!(dir = %dir.display(), units = handles.len(), "Enumerated dylib units");
        Ok(handles)
    }

    fn load_unit(&self, handle: &UnitHandle) -> PluginResult<Unit> {
        let unit_load = |source: Box<dyn std::error::Error + Send + Sync>| PluginError::UnitLoad {
            unit: handle.name().to_string(),
            source,
        };

        // SAFETY: loading a library executes its initializers. The host
        // opted into this by pointing a manager at the directory.
        let library =
            unsafe { Library::new(handle.path()) }.map_err(|e| unit_load(Box::new(e)))?;

        let entry = {
            // SAFETY: the symbol type is fixed by the export_unit! contract.
            let entry_fn: Symbol<'_, UnitEntryFn> = unsafe { library.get(UNIT_ENTRY_SYMBOL) }
                .map_err(|e| unit_load(Box::new(e)))?;
            // SAFETY: entry functions generated by export_unit! only read
            // static data.
            unsafe { entry_fn() }
        };

        // A major-version mismatch means the descriptor layout itself cannot
        // be trusted, so this is a load failure, not a warning.
        if entry.api_version >> 16 != LATTICE_PLUGIN_API_VERSION >> 16 {
            return Err(unit_load(
                format!(
                    "unit plugin API major version {} does not match host {}",
                    entry.api_version >> 16,
                    LATTICE_PLUGIN_API_VERSION >> 16
                )
                .into(),
            ));
        }

        let descriptors: Vec<PluginDescriptor> = if entry.len == 0 || entry.descriptors.is_null()
        {
            Vec::new()
        } else {
            // SAFETY: the entry reports a pointer into the unit's static
            // descriptor table together with its length; the library stays
            // alive inside the returned Unit.
            unsafe { std::slice::from_raw_parts(entry.descriptors, entry.len) }.to_vec()
        };

        info!(
            unit = %handle,
            path = %handle.path().display(),
            descriptors = descriptors.len(),
            "Dylib unit loaded"
        );

        Ok(Unit::with_keepalive(descriptors, Box::new(library)))
    }
}

// ─── export_unit! ─────────────────────────────────────────────────────────────

/// Exports a unit's descriptor table from a dylib plugin crate.
///
/// Expands to the `lattice_unit_entry` symbol the [`DylibLoader`] looks up.
/// Call it once per crate, at the crate root, with the unit's descriptors:
///
/// ```rust,ignore
/// export_unit!(GREETER);
/// ```
///
/// The plugin crate must be built as a `cdylib` (or `dylib`) for the symbol
/// to be visible to the host.
#[macro_export]
macro_rules! export_unit {
    ( $( $descriptor:expr ),+ $(,)? ) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn lattice_unit_entry() -> $crate::UnitEntry {
            static DESCRIPTORS: &[$crate::PluginDescriptor] = &[$( $descriptor ),+];
            $crate::UnitEntry {
                api_version: $crate::LATTICE_PLUGIN_API_VERSION,
                descriptors: DESCRIPTORS.as_ptr(),
                len: DESCRIPTORS.len(),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    #[test]
    fn test_list_units_filters_and_orders_lexically() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta.so"), b"").unwrap();
        fs::write(dir.path().join("alpha.so"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.so")).unwrap();

        let handles = DylibLoader::new().list_units(dir.path()).unwrap();
        let names: Vec<&str> = handles.iter().map(UnitHandle::name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_list_units_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let result = DylibLoader::new().list_units(&missing);
        assert!(matches!(
            result,
            Err(PluginError::InvalidDirectory { .. })
        ));
    }

    #[test]
    fn test_unloadable_file_is_a_unit_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.so");
        fs::write(&path, b"this is not a shared library").unwrap();

        let handle = UnitHandle::new("garbage", &path);
        let result = DylibLoader::new().load_unit(&handle);
        assert!(matches!(
            result,
            Err(PluginError::UnitLoad { ref unit, .. }) if unit == "garbage"
        ));
    }
}
