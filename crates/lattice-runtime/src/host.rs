//! Runtime orchestration.
//!
//! [`LatticeRuntime`] wires the pieces together from configuration: it
//! builds the shared [`EventRegistry`] from the `[events]` section, one
//! [`PluginManager`] per enabled `[[plugins]]` group, and exposes load and
//! dispatch entry points to the host application.
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_core::EventArgs;
//! use lattice_runtime::{LatticeRuntime, config};
//!
//! let config = config::load_config()?;
//! let mut runtime = LatticeRuntime::from_config(config)?;
//!
//! let reports = runtime.load_all()?;
//! for (group, report) in &reports {
//!     for failure in &report.failures {
//!         eprintln!("[{group}] {}: {}", failure.handle, failure.error);
//!     }
//! }
//!
//! runtime.emit("on_start", &EventArgs::empty())?;
//! ```

use std::sync::Arc;

use tracing::info;

use lattice_core::{EventArgs, EventRegistry, PluginContext};
use lattice_framework::{LoadReport, PluginManager, UnitLoader};
use lattice_loader::DylibLoader;

use crate::config::{LatticeConfig, validate_config};
use crate::error::{HostError, HostResult};
use crate::logging;

/// Factory producing one [`UnitLoader`] per plugin manager.
pub type LoaderFactory = Box<dyn Fn() -> Box<dyn UnitLoader>>;

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`LatticeRuntime`].
pub struct LatticeRuntimeBuilder {
    config: Option<LatticeConfig>,
    loader_factory: LoaderFactory,
    init_logging: bool,
}

impl Default for LatticeRuntimeBuilder {
    fn default() -> Self {
        Self {
            config: None,
            loader_factory: Box::new(|| Box::new(DylibLoader::new())),
            init_logging: true,
        }
    }
}

impl LatticeRuntimeBuilder {
    /// Uses `config` instead of loading from the default locations.
    pub fn config(mut self, config: LatticeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Substitutes the unit-loading substrate (default: [`DylibLoader`]).
    ///
    /// The factory is called once per plugin group.
    pub fn loader_factory(mut self, factory: LoaderFactory) -> Self {
        self.loader_factory = factory;
        self
    }

    /// Skips logging initialization; the embedding application keeps its own
    /// subscriber.
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    /// Validates the configuration and assembles the runtime.
    pub fn build(self) -> HostResult<LatticeRuntime> {
        let config = match self.config {
            Some(config) => config,
            None => crate::config::load_config()?,
        };
        validate_config(&config)?;

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        let registry = Arc::new(EventRegistry::new(config.events.strict));
        registry.declare_all(config.events.declare.iter().cloned());

        let mut managers = Vec::new();
        for group in &config.plugins {
            if !group.enabled {
                info!(group = %group.name, "Plugin group disabled, skipping");
                continue;
            }
            let context = PluginContext::from(group.context.clone());
            let manager = PluginManager::new(
                group.name.clone(),
                group.path.clone(),
                context,
                (self.loader_factory)(),
            )
            .with_registry(Arc::clone(&registry));
            managers.push(manager);
        }

        info!(
            strict = config.events.strict,
            declared = config.events.declare.len(),
            groups = managers.len(),
            "Runtime assembled"
        );

        Ok(LatticeRuntime {
            config,
            registry,
            managers,
        })
    }
}

// =============================================================================
// LatticeRuntime
// =============================================================================

/// Config-driven host object owning the shared registry and the plugin
/// managers.
pub struct LatticeRuntime {
    config: LatticeConfig,
    registry: Arc<EventRegistry>,
    managers: Vec<PluginManager>,
}

impl LatticeRuntime {
    /// Starts building a runtime.
    pub fn builder() -> LatticeRuntimeBuilder {
        LatticeRuntimeBuilder::default()
    }

    /// Builds a runtime directly from `config` with the default substrate.
    pub fn from_config(config: LatticeConfig) -> HostResult<Self> {
        Self::builder().config(config).build()
    }

    /// The effective configuration.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// The shared event registry.
    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    /// The plugin managers, one per enabled group.
    pub fn managers(&self) -> &[PluginManager] {
        &self.managers
    }

    /// Runs `load_all` on every manager, returning one `(group, report)`
    /// pair per manager in configuration order.
    ///
    /// Per-unit failures stay inside the reports; only a manager that cannot
    /// run its pass at all (e.g. an invalid load path) errors the call.
    pub fn load_all(&mut self) -> HostResult<Vec<(String, LoadReport)>> {
        let mut reports = Vec::with_capacity(self.managers.len());
        for manager in &mut self.managers {
            let group = manager.name().to_string();
            let report = manager.load_all().map_err(|source| HostError::Plugin {
                group: group.clone(),
                source,
            })?;
            reports.push((group, report));
        }
        Ok(reports)
    }

    /// Dispatches `args` to every listener of `event`, in registration
    /// order.
    pub fn emit(&self, event: &str, args: &EventArgs) -> HostResult<()> {
        self.registry.call(event, args).map_err(HostError::from)
    }
}

impl std::fmt::Debug for LatticeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatticeRuntime")
            .field("registry", &self.registry)
            .field("managers", &self.managers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use lattice_core::{BoxError, EventError};
    use lattice_framework::{PluginDescriptor, define_plugin};
    use lattice_loader::StaticLoader;

    use crate::config::PluginGroupConfig;

    struct Greeter {
        greeting: String,
        heard: Mutex<Vec<String>>,
    }

    impl Greeter {
        fn from_context(ctx: &PluginContext) -> Result<Self, BoxError> {
            Ok(Self {
                greeting: ctx.get_as("greeting")?,
                heard: Mutex::new(Vec::new()),
            })
        }

        fn on_message(&self, args: &EventArgs) -> Result<(), BoxError> {
            if let Some(who) = args.downcast_ref::<String>() {
                self.heard
                    .lock()
                    .unwrap()
                    .push(format!("{} {who}", self.greeting));
            }
            Ok(())
        }
    }

    static GREETER: PluginDescriptor = define_plugin! {
        name: "greeter",
        state: Greeter,
        build: Greeter::from_context,
        listeners: [
            "on_message" => Greeter::on_message,
        ],
    };

    fn test_config() -> LatticeConfig {
        let mut context = serde_json::Map::new();
        context.insert("greeting".into(), "hello".into());

        let mut config = LatticeConfig::default();
        config.events.declare = vec!["on_message".to_string()];
        config.plugins = vec![
            PluginGroupConfig {
                name: "Plugin".to_string(),
                path: "plugins".into(),
                enabled: true,
                context,
            },
            PluginGroupConfig {
                name: "Disabled".to_string(),
                path: "disabled-plugins".into(),
                enabled: false,
                context: Default::default(),
            },
        ];
        config
    }

    fn test_runtime() -> LatticeRuntime {
        LatticeRuntime::builder()
            .config(test_config())
            .loader_factory(Box::new(|| {
                Box::new(StaticLoader::new().with_unit("greeter_unit", vec![GREETER]))
            }))
            .without_logging()
            .build()
            .unwrap()
    }

    #[test]
    fn test_disabled_groups_are_skipped() {
        let runtime = test_runtime();
        assert_eq!(runtime.managers().len(), 1);
        assert_eq!(runtime.managers()[0].name(), "Plugin");
    }

    #[test]
    fn test_load_and_emit_reaches_the_plugin() {
        let mut runtime = test_runtime();
        let reports = runtime.load_all().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].1.is_complete());
        assert_eq!(reports[0].1.loaded, 1);

        runtime
            .emit("on_message", &EventArgs::new("world".to_string()))
            .unwrap();

        let greeter = runtime.managers()[0].units()[0]
            .plugin()
            .instance_as::<Greeter>()
            .unwrap();
        assert_eq!(*greeter.heard.lock().unwrap(), vec!["hello world"]);
    }

    #[test]
    fn test_emit_undeclared_event_fails_in_strict_mode() {
        let runtime = test_runtime();
        let result = runtime.emit("on_unknown", &EventArgs::empty());
        assert!(matches!(
            result,
            Err(HostError::Event(EventError::UnknownEvent { ref name })) if name == "on_unknown"
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = test_config();
        config.plugins.push(config.plugins[0].clone());
        let result = LatticeRuntime::builder()
            .config(config)
            .without_logging()
            .build();
        assert!(matches!(result, Err(HostError::Config(_))));
    }
}
