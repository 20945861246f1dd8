use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use lattice_core::SharedListener;

// ─── PluginMetadata ───────────────────────────────────────────────────────────

/// Descriptive metadata attached to every plugin.
///
/// Populated automatically by the [`define_plugin!`] macro; `version`
/// defaults to the `CARGO_PKG_VERSION` of the crate that defined the plugin
/// and `desc` to the empty string, both overridable in the macro invocation.
///
/// [`define_plugin!`]: crate::define_plugin
#[derive(Debug, Clone, Copy)]
pub struct PluginMetadata {
    /// Semver version string of the plugin.
    pub version: &'static str,
    /// One-line description shown in logs and registries.
    pub desc: &'static str,
}

// ─── EventBinding ─────────────────────────────────────────────────────────────

/// One entry in a plugin's binding table: an event name and the listener —
/// already bound to the plugin instance — that should fire for it.
///
/// The table's order is the declaration order in [`define_plugin!`], and the
/// manager registers bindings in exactly that order.
///
/// [`define_plugin!`]: crate::define_plugin
#[derive(Clone)]
pub struct EventBinding {
    event: Cow<'static, str>,
    listener: SharedListener,
}

impl EventBinding {
    /// Creates a binding for `event`.
    pub fn new(event: impl Into<Cow<'static, str>>, listener: SharedListener) -> Self {
        Self {
            event: event.into(),
            listener,
        }
    }

    /// The event name this binding listens to.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// A shared handle to the bound listener.
    pub fn listener(&self) -> SharedListener {
        Arc::clone(&self.listener)
    }
}

impl std::fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBinding")
            .field("event", &self.event)
            .finish()
    }
}

// ─── Plugin ───────────────────────────────────────────────────────────────────

/// A live plugin instance bundling its state object and binding table.
///
/// Created by a [`PluginDescriptor`]'s constructor — normally through the
/// [`define_plugin!`] macro. The state object is held behind
/// `Arc<dyn Any + Send + Sync>` so hosts (and tests) can downcast and inspect
/// it; the listeners in the binding table hold their own clones of the same
/// `Arc`, which is how a dispatched listener runs with access to the
/// instance's state.
///
/// [`PluginDescriptor`]: crate::plugin::PluginDescriptor
/// [`define_plugin!`]: crate::define_plugin
pub struct Plugin {
    name: Cow<'static, str>,
    metadata: PluginMetadata,
    bindings: Vec<EventBinding>,
    instance: Arc<dyn Any + Send + Sync>,
}

impl Plugin {
    /// Returns the plugin's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the plugin's metadata.
    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    /// The plugin's binding table, in declaration order.
    pub fn bindings(&self) -> &[EventBinding] {
        &self.bindings
    }

    /// The instantiated state object.
    pub fn instance(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.instance
    }

    /// Downcasts the state object to its concrete type.
    pub fn instance_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().ok()
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("version", &self.metadata.version)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

// ─── Internal constructor (used by define_plugin! macro) ─────────────────────

impl Plugin {
    /// Creates a `Plugin` directly. Only called by the [`define_plugin!`]
    /// macro.
    ///
    /// [`define_plugin!`]: crate::define_plugin
    #[doc(hidden)]
    pub fn __new(
        name: &'static str,
        metadata: PluginMetadata,
        bindings: Vec<EventBinding>,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Self {
        Plugin {
            name: Cow::Borrowed(name),
            metadata,
            bindings,
            instance,
        }
    }
}
