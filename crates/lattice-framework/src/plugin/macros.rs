// ─── Internal helpers ─────────────────────────────────────────────────────────
//
// Used exclusively by `define_plugin!`. Not part of the public API.

/// Internal helper: picks an override literal or falls back to a default.
#[macro_export]
#[doc(hidden)]
macro_rules! __plugin_meta_or {
    ([] $default:expr) => {
        $default
    };
    ([$value:literal] $default:expr) => {
        $value
    };
}

/// Internal helper: builds a [`PluginMetadata`] from optional overrides.
///
/// [`PluginMetadata`]: crate::plugin::PluginMetadata
#[macro_export]
#[doc(hidden)]
macro_rules! __plugin_metadata {
    ([$($version:literal)?] [$($desc:literal)?]) => {
        $crate::plugin::PluginMetadata {
            version: $crate::__plugin_meta_or!([$($version)?] ::std::env!("CARGO_PKG_VERSION")),
            desc: $crate::__plugin_meta_or!([$($desc)?] ""),
        }
    };
}

// ─── define_plugin! ───────────────────────────────────────────────────────────

/// Creates a [`PluginDescriptor`] — the static, `Copy` handle to a plugin.
///
/// The `listeners` block is the plugin's **binding table**: a registration
/// list attached at definition time and scanned once during instantiation.
/// Each entry binds an event name to a method of the state type; the listener
/// runs with the instantiated state as receiver, so it sees whatever the
/// constructor copied out of the shared context.
///
/// # Syntax
///
/// ```rust,ignore
/// use lattice_framework::define_plugin;
/// use lattice_framework::plugin::PluginDescriptor;
/// use lattice_core::{BoxError, EventArgs, PluginContext};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// impl Greeter {
///     fn from_context(ctx: &PluginContext) -> Result<Self, BoxError> {
///         Ok(Self {
///             greeting: ctx.get_as("greeting")?,
///         })
///     }
///
///     fn on_message(&self, args: &EventArgs) -> Result<(), BoxError> {
///         if let Some(who) = args.downcast_ref::<String>() {
///             println!("{}, {who}", self.greeting);
///         }
///         Ok(())
///     }
/// }
///
/// pub static GREETER: PluginDescriptor = define_plugin! {
///     name: "greeter",
///     desc: "Greets whoever shows up.",
///     state: Greeter,
///     build: Greeter::from_context,
///     listeners: [
///         "on_message" => Greeter::on_message,
///     ],
/// };
/// ```
///
/// `version` and `desc` are optional; `version` defaults to the defining
/// crate's `CARGO_PKG_VERSION`. `build` is any expression callable as
/// `fn(&PluginContext) -> Result<State, BoxError>`. Binding order in
/// `listeners` is preserved and becomes registration order.
#[macro_export]
macro_rules! define_plugin {
    (
        name: $name:literal,
        $(version: $version:literal,)?
        $(desc: $desc:literal,)?
        state: $state:ty,
        build: $build:expr,
        listeners: [ $( $event:literal => $method:path ),* $(,)? ] $(,)?
    ) => {
        $crate::plugin::PluginDescriptor {
            api_version: $crate::plugin::LATTICE_PLUGIN_API_VERSION,
            name: $name,
            metadata: $crate::__plugin_metadata!([$($version)?] [$($desc)?]),
            create: |context: &$crate::PluginContext| {
                let state: $state = ($build)(context)?;
                let instance = ::std::sync::Arc::new(state);
                let bindings = ::std::vec![
                    $(
                        $crate::plugin::EventBinding::new($event, {
                            let instance = ::std::sync::Arc::clone(&instance);
                            ::std::sync::Arc::new(
                                move |args: &$crate::EventArgs| $method(&*instance, args)
                            ) as $crate::SharedListener
                        }),
                    )*
                ];
                ::std::result::Result::Ok($crate::plugin::Plugin::__new(
                    $name,
                    $crate::__plugin_metadata!([$($version)?] [$($desc)?]),
                    bindings,
                    instance,
                ))
            },
        }
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use lattice_core::{BoxError, EventArgs, PluginContext, PluginContextBuilder};

    use crate::plugin::{LATTICE_PLUGIN_API_VERSION, PluginDescriptor};

    struct Echo {
        prefix: String,
        seen: Mutex<Vec<u32>>,
    }

    impl Echo {
        fn from_context(ctx: &PluginContext) -> Result<Self, BoxError> {
            Ok(Self {
                prefix: ctx.get_as("prefix")?,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn on_number(&self, args: &EventArgs) -> Result<(), BoxError> {
            if let Some(n) = args.downcast_ref::<u32>() {
                self.seen.lock().unwrap().push(*n);
            }
            Ok(())
        }

        fn on_reset(&self, _args: &EventArgs) -> Result<(), BoxError> {
            self.seen.lock().unwrap().clear();
            Ok(())
        }
    }

    static ECHO: PluginDescriptor = define_plugin! {
        name: "echo",
        version: "1.2.3",
        desc: "Collects numbers.",
        state: Echo,
        build: Echo::from_context,
        listeners: [
            "on_number" => Echo::on_number,
            "on_reset" => Echo::on_reset,
        ],
    };

    fn context() -> PluginContext {
        PluginContextBuilder::default().insert("prefix", ">>").build()
    }

    #[test]
    fn test_descriptor_carries_metadata() {
        assert_eq!(ECHO.name, "echo");
        assert_eq!(ECHO.api_version, LATTICE_PLUGIN_API_VERSION);
        assert_eq!(ECHO.metadata.version, "1.2.3");
        assert_eq!(ECHO.metadata.desc, "Collects numbers.");
        assert!(ECHO.is_compatible());
    }

    #[test]
    fn test_constructor_reads_the_context() {
        let plugin = ECHO.instantiate(&context()).unwrap();
        let echo = plugin.instance_as::<Echo>().unwrap();
        assert_eq!(echo.prefix, ">>");
    }

    #[test]
    fn test_constructor_error_propagates() {
        // missing "prefix" key
        let result = ECHO.instantiate(&PluginContext::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_bindings_keep_declaration_order_and_receiver() {
        let plugin = ECHO.instantiate(&context()).unwrap();
        let events: Vec<&str> = plugin.bindings().iter().map(|b| b.event()).collect();
        assert_eq!(events, vec!["on_number", "on_reset"]);

        let on_number = plugin.bindings()[0].listener();
        (on_number.as_ref())(&EventArgs::new(42u32)).unwrap();
        let echo = plugin.instance_as::<Echo>().unwrap();
        assert_eq!(*echo.seen.lock().unwrap(), vec![42]);

        let on_reset = plugin.bindings()[1].listener();
        (on_reset.as_ref())(&EventArgs::empty()).unwrap();
        assert!(echo.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_metadata_defaults_to_crate_version() {
        struct Bare;
        impl Bare {
            fn build(_: &PluginContext) -> Result<Self, BoxError> {
                Ok(Self)
            }
        }

        static BARE: PluginDescriptor = define_plugin! {
            name: "bare",
            state: Bare,
            build: Bare::build,
            listeners: [],
        };

        assert_eq!(BARE.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(BARE.metadata.desc, "");
    }
}
