//! Plugin lifecycle management.
//!
//! [`PluginManager`] is the central owner of one family of plugins. It:
//!
//! - Walks its load path through the configured [`UnitLoader`] substrate and
//!   loads units in lexical name order.
//! - Instantiates each unit's plugin, passing the manager's shared
//!   [`PluginContext`] to the constructor.
//! - Registers every entry of the plugin's binding table on the shared
//!   [`EventRegistry`], in table order, when one is wired.
//! - Isolates per-unit failures: one broken unit never aborts the batch.
//!   Every failure is reported as a `(handle, error)` pair in the
//!   [`LoadReport`] so the host can decide whether a partial plugin set is
//!   acceptable.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lattice_core::{EventArgs, EventRegistry, PluginContext};
//! use lattice_framework::manager::PluginManager;
//!
//! let registry = Arc::new(EventRegistry::strict_mode());
//! registry.declare("on_message");
//!
//! let mut manager = PluginManager::new(
//!     "Plugin",
//!     "plugins",
//!     PluginContext::builder().insert("greeting", "hello").build(),
//!     Box::new(loader),
//! )
//! .with_registry(Arc::clone(&registry));
//!
//! let report = manager.load_all()?;
//! if !report.is_complete() {
//!     eprintln!("{} unit(s) failed to load", report.failures.len());
//! }
//! registry.call("on_message", &EventArgs::new("world".to_string()))?;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use lattice_core::{EventError, EventRegistry, ListenerToken, PluginContext};

use crate::error::{PluginError, PluginResult};
use crate::plugin::{LATTICE_PLUGIN_API_VERSION, Plugin};
use crate::unit::{Unit, UnitHandle, UnitLoader};

// =============================================================================
// ManagerState
// =============================================================================

/// Tracks where a [`PluginManager`] is in its load cycle.
///
/// The state machine is:
///
/// ```text
/// new() ──────────► Created
///     load_all() ─► Loading ─► Loaded
/// ```
///
/// `Loaded` is terminal for one `load_all` call; calling `load_all` again
/// re-enters `Loading` and replaces the unit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Constructed, nothing loaded yet.
    Created,
    /// A `load_all` pass is in progress.
    Loading,
    /// The most recent `load_all` pass finished.
    Loaded,
}

// =============================================================================
// PluginUnit
// =============================================================================

/// One loaded plugin: the instantiated [`Plugin`], the handle of the unit it
/// came from, and the registry tokens of its auto-registered listeners.
pub struct PluginUnit {
    handle: UnitHandle,
    plugin: Plugin,
    tokens: Vec<ListenerToken>,
    _unit: Unit,
}

impl PluginUnit {
    /// The source handle this plugin was loaded from.
    pub fn handle(&self) -> &UnitHandle {
        &self.handle
    }

    /// The live plugin.
    pub fn plugin(&self) -> &Plugin {
        &self.plugin
    }
}

impl std::fmt::Debug for PluginUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginUnit")
            .field("handle", &self.handle)
            .field("plugin", &self.plugin)
            .field("listeners", &self.tokens.len())
            .finish()
    }
}

// =============================================================================
// LoadReport
// =============================================================================

/// One unit that failed to load, with the error that stopped it.
#[derive(Debug)]
pub struct LoadFailure {
    /// The unit that failed.
    pub handle: UnitHandle,
    /// Why it failed.
    pub error: PluginError,
}

/// Outcome of one `load_all` pass.
#[derive(Debug)]
pub struct LoadReport {
    /// Number of plugins loaded successfully.
    pub loaded: usize,
    /// The units that failed, in discovery order.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Returns `true` when every discovered unit loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// PluginManager
// =============================================================================

/// Discovers, loads, and instantiates one family of plugins under a load
/// path, injecting a shared context into each and wiring their binding
/// tables into an event registry.
///
/// # Concurrency
///
/// `load_all` takes `&mut self`; the manager has one logical owner and needs
/// no internal locking. The registry it shares with the host has its own.
pub struct PluginManager {
    name: String,
    load_path: PathBuf,
    context: PluginContext,
    registry: Option<Arc<EventRegistry>>,
    loader: Box<dyn UnitLoader>,
    units: Vec<PluginUnit>,
    state: ManagerState,
}

impl PluginManager {
    /// Creates a manager for the plugins under `load_path`.
    ///
    /// `name` is a diagnostic label only; `context` is handed to every
    /// plugin constructor of this manager.
    pub fn new(
        name: impl Into<String>,
        load_path: impl Into<PathBuf>,
        context: PluginContext,
        loader: Box<dyn UnitLoader>,
    ) -> Self {
        Self {
            name: name.into(),
            load_path: load_path.into(),
            context,
            registry: None,
            loader,
            units: Vec::new(),
            state: ManagerState::Created,
        }
    }

    /// Wires a shared event registry; binding tables of loaded plugins are
    /// auto-registered on it.
    ///
    /// Without a registry, bindings are discovered but never registered —
    /// the manager logs a warning per affected plugin, since those listeners
    /// can never fire.
    pub fn with_registry(mut self, registry: Arc<EventRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The manager's diagnostic label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The directory this manager scans.
    pub fn load_path(&self) -> &Path {
        &self.load_path
    }

    /// The shared context handed to plugin constructors.
    pub fn context(&self) -> &PluginContext {
        &self.context
    }

    /// Current position in the load cycle.
    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// The plugins produced by the most recent [`load_all`](Self::load_all).
    pub fn units(&self) -> &[PluginUnit] {
        &self.units
    }

    /// Discovers and loads every unit under the load path.
    ///
    /// Units are processed in lexical name order, so a fixed directory
    /// snapshot always yields the same unit sequence — and therefore the
    /// same listener registration order. A previous pass's units and
    /// registrations are dropped first; re-running on an unchanged directory
    /// reproduces the same set without accumulating stale listeners.
    ///
    /// Per-unit failures (unloadable unit, wrong descriptor shape, failing
    /// constructor, duplicate plugin name, strict-mode registration) are
    /// collected in the returned [`LoadReport`] and do not abort the batch.
    /// Only a failure to enumerate the load path itself errors the call.
    pub fn load_all(&mut self) -> PluginResult<LoadReport> {
        self.state = ManagerState::Loading;
        self.unload_units();

        let mut handles = self.loader.list_units(&self.load_path)?;
        handles.sort_by(|a, b| a.name().cmp(b.name()));

        let mut failures = Vec::new();
        for handle in handles {
            match self.load_one(&handle) {
                Ok(unit) => {
                    info!(
                        manager = %self.name,
                        plugin = %unit.plugin().name(),
                        unit = %handle,
                        "Plugin loaded"
                    );
                    self.units.push(unit);
                }
                Err(err) => {
                    error!(
                        manager = %self.name,
                        unit = %handle,
                        error = %err,
                        "Failed to load plugin unit"
                    );
                    failures.push(LoadFailure { handle, error: err });
                }
            }
        }

        self.state = ManagerState::Loaded;
        Ok(LoadReport {
            loaded: self.units.len(),
            failures,
        })
    }

    fn load_one(&self, handle: &UnitHandle) -> PluginResult<PluginUnit> {
        let unit = self.loader.load_unit(handle)?;

        let descriptor = match unit.descriptors() {
            [single] => *single,
            other => {
                return Err(PluginError::Shape {
                    unit: handle.name().to_string(),
                    found: other.len(),
                });
            }
        };

        if !descriptor.is_compatible() {
            warn!(
                plugin = %descriptor.name,
                descriptor_version = %format!(
                    "{}.{}",
                    descriptor.api_version >> 16,
                    descriptor.api_version & 0xFFFF
                ),
                host_version = %format!(
                    "{}.{}",
                    LATTICE_PLUGIN_API_VERSION >> 16,
                    LATTICE_PLUGIN_API_VERSION & 0xFFFF
                ),
                "Plugin API version mismatch — loading anyway, but behaviour may be undefined"
            );
        }

        if self.units.iter().any(|u| u.plugin().name() == descriptor.name) {
            return Err(PluginError::AlreadyLoaded {
                plugin: descriptor.name.to_string(),
            });
        }

        let plugin =
            descriptor
                .instantiate(&self.context)
                .map_err(|source| PluginError::Instantiate {
                    plugin: descriptor.name.to_string(),
                    source,
                })?;

        let tokens = match &self.registry {
            Some(registry) => Self::register_bindings(registry, &plugin)?,
            None => {
                if !plugin.bindings().is_empty() {
                    warn!(
                        plugin = %plugin.name(),
                        orphaned = plugin.bindings().len(),
                        "No event registry wired; declared listeners will never fire"
                    );
                }
                Vec::new()
            }
        };

        Ok(PluginUnit {
            handle: handle.clone(),
            plugin,
            tokens,
            _unit: unit,
        })
    }

    /// Registers a plugin's binding table, in table order.
    ///
    /// Under strict mode every binding name is validated first, so a plugin
    /// with one undeclared binding registers nothing at all.
    fn register_bindings(
        registry: &EventRegistry,
        plugin: &Plugin,
    ) -> PluginResult<Vec<ListenerToken>> {
        if registry.strict() {
            for binding in plugin.bindings() {
                if !registry.declared(binding.event()) {
                    return Err(EventError::UnknownEvent {
                        name: binding.event().to_string(),
                    }
                    .into());
                }
            }
        }

        let mut tokens = Vec::with_capacity(plugin.bindings().len());
        for binding in plugin.bindings() {
            tokens.push(registry.register_shared(binding.event(), binding.listener())?);
        }
        Ok(tokens)
    }

    /// Drops the current unit set and detaches its registry registrations.
    fn unload_units(&mut self) {
        if let Some(registry) = &self.registry {
            for unit in &self.units {
                for token in &unit.tokens {
                    registry.remove(*token);
                }
            }
        }
        self.units.clear();
    }
}

impl Drop for PluginManager {
    fn drop(&mut self) {
        self.unload_units();
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("name", &self.name)
            .field("load_path", &self.load_path)
            .field("state", &self.state)
            .field("units", &self.units.len())
            .finish()
    }
}
