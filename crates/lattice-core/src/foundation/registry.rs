//! Named-event registry with ordered synchronous dispatch.
//!
//! [`EventRegistry`] owns the mapping from event name to an ordered list of
//! listeners and the name-validation policy (strict mode). Host code and
//! plugin auto-registration both attach listeners here; [`call`] invokes them
//! in registration order on the caller's thread.
//!
//! # Strict mode
//!
//! A strict registry requires every event name to be declared via
//! [`declare`] before it can be registered against or dispatched; undeclared
//! names fail with [`EventError::UnknownEvent`]. A non-strict registry
//! accepts any name.
//!
//! # Reentrancy
//!
//! Dispatch is snapshot-then-invoke: the listener list is copied under the
//! registry's mutex, the mutex is released, and only then are the listeners
//! run. A listener may therefore `register`, `declare`, or `call` on the same
//! registry without deadlocking — mutations become visible on the next
//! dispatch, never the one in flight.
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_core::{EventArgs, EventRegistry};
//!
//! let registry = EventRegistry::strict_mode();
//! registry.declare("on_start");
//! registry.register("on_start", |_args| {
//!     println!("starting");
//!     Ok(())
//! })?;
//! registry.call("on_start", &EventArgs::empty())?;
//! ```
//!
//! [`declare`]: EventRegistry::declare
//! [`call`]: EventRegistry::call

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::args::EventArgs;
use super::error::{BoxError, EventError, EventResult};

/// The callable shape of a listener.
pub type ListenerFn = dyn Fn(&EventArgs) -> Result<(), BoxError> + Send + Sync;

/// A listener shared between the registry and its owner (e.g. a plugin
/// instance whose bound method it wraps).
pub type SharedListener = Arc<ListenerFn>;

/// Handle to one registration, usable with [`EventRegistry::remove`].
///
/// Tokens are unique per registry for the registry's lifetime; removing a
/// token does not disturb the relative order of the remaining listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

struct Registered {
    token: ListenerToken,
    callback: SharedListener,
}

#[derive(Default)]
struct RegistryState {
    declared: HashSet<String>,
    listeners: HashMap<String, Vec<Registered>>,
    next_token: u64,
}

/// Named-event declaration, listener registration, and ordered dispatch.
///
/// # Concurrency
///
/// All operations take `&self`; interior state lives behind a single mutex
/// held only for bookkeeping, never across listener invocations. The design
/// assumes one logical owner thread per registry — the mutex makes
/// interleaved access safe, not meaningful.
pub struct EventRegistry {
    strict: bool,
    state: Mutex<RegistryState>,
}

impl EventRegistry {
    /// Creates a registry; `strict` fixes the name-validation policy for the
    /// registry's lifetime.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// A registry that requires declaration before use.
    pub fn strict_mode() -> Self {
        Self::new(true)
    }

    /// A registry that accepts any event name.
    pub fn non_strict() -> Self {
        Self::new(false)
    }

    /// Returns the name-validation policy.
    pub fn strict(&self) -> bool {
        self.strict
    }

    // ─── Declaration ─────────────────────────────────────────────────────────

    /// Declares an event name. Idempotent: declaring a name twice is not an
    /// error and has no effect on listeners already attached to it.
    pub fn declare(&self, name: impl Into<String>) {
        let name = name.into();
        let mut state = self.state.lock();
        if state.declared.insert(name.clone()) {
            trace!(event = %name, "Event declared");
        }
    }

    /// Declares every name in `names`.
    pub fn declare_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.declare(name);
        }
    }

    /// Returns `true` if `name` has been declared.
    pub fn declared(&self, name: &str) -> bool {
        self.state.lock().declared.contains(name)
    }

    /// Returns all declared event names, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let state = self.state.lock();
        let mut names: Vec<String> = state.declared.iter().cloned().collect();
        names.sort();
        names
    }

    /// Number of listeners currently attached to `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.state
            .lock()
            .listeners
            .get(name)
            .map_or(0, Vec::len)
    }

    // ─── Registration ────────────────────────────────────────────────────────

    /// Appends `listener` to the ordered listener list of `name`.
    ///
    /// Under strict mode an undeclared `name` fails with
    /// [`EventError::UnknownEvent`]. Registering the identical callable twice
    /// is allowed and makes it fire twice — the registry never deduplicates.
    pub fn register<F>(&self, name: &str, listener: F) -> EventResult<ListenerToken>
    where
        F: Fn(&EventArgs) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(listener))
    }

    /// Like [`register`](Self::register), for a listener that is already
    /// shared — plugin auto-registration hands over clones of the callables
    /// bound to the plugin instance.
    pub fn register_shared(&self, name: &str, listener: SharedListener) -> EventResult<ListenerToken> {
        let mut state = self.state.lock();
        if self.strict && !state.declared.contains(name) {
            return Err(EventError::UnknownEvent {
                name: name.to_string(),
            });
        }
        state.next_token += 1;
        let token = ListenerToken(state.next_token);
        state
            .listeners
            .entry(name.to_string())
            .or_default()
            .push(Registered {
                token,
                callback: listener,
            });
        debug!(event = %name, "Listener registered");
        Ok(token)
    }

    /// Detaches the registration identified by `token`.
    ///
    /// Returns `true` if a listener was removed. The relative order of the
    /// remaining listeners is unchanged.
    pub fn remove(&self, token: ListenerToken) -> bool {
        let mut state = self.state.lock();
        for list in state.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|r| r.token == token) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    // ─── Dispatch ────────────────────────────────────────────────────────────

    /// Synchronously invokes every listener of `name`, in registration order,
    /// each receiving the identical `args`.
    ///
    /// Under strict mode an undeclared `name` fails with
    /// [`EventError::UnknownEvent`] before anything runs. A name with zero
    /// listeners is a no-op. A listener error aborts the remaining
    /// invocations and surfaces as [`EventError::Listener`] with the
    /// listener's own error preserved as the source — dispatch is a direct
    /// call chain, deliberately not isolated per-listener.
    pub fn call(&self, name: &str, args: &EventArgs) -> EventResult<()> {
        let snapshot: Vec<SharedListener> = {
            let state = self.state.lock();
            if self.strict && !state.declared.contains(name) {
                return Err(EventError::UnknownEvent {
                    name: name.to_string(),
                });
            }
            state
                .listeners
                .get(name)
                .map(|list| list.iter().map(|r| Arc::clone(&r.callback)).collect())
                .unwrap_or_default()
        };

        trace!(event = %name, listeners = snapshot.len(), "Dispatching event");
        for listener in snapshot {
            (listener.as_ref())(args).map_err(|source| EventError::Listener {
                event: name.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EventRegistry")
            .field("strict", &self.strict)
            .field("declared", &state.declared.len())
            .field(
                "listeners",
                &state.listeners.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_listeners_run_in_registration_order_with_same_args() {
        let registry = EventRegistry::non_strict();
        let log = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let log = Arc::clone(&log);
            registry
                .register("on_test", move |args| {
                    let value = *args.downcast_ref::<u32>().unwrap();
                    log.lock().push((id, value));
                    Ok(())
                })
                .unwrap();
        }

        registry.call("on_test", &EventArgs::new(42u32)).unwrap();
        assert_eq!(*log.lock(), vec![(0, 42), (1, 42), (2, 42)]);
    }

    #[test]
    fn test_strict_call_on_undeclared_name_fails() {
        let registry = EventRegistry::strict_mode();
        let result = registry.call("never_declared", &EventArgs::empty());
        assert!(matches!(
            result,
            Err(EventError::UnknownEvent { name }) if name == "never_declared"
        ));
    }

    #[test]
    fn test_non_strict_call_on_undeclared_name_is_noop() {
        let registry = EventRegistry::non_strict();
        assert!(registry.call("never_declared", &EventArgs::empty()).is_ok());
    }

    #[test]
    fn test_strict_register_requires_declare() {
        let registry = EventRegistry::strict_mode();
        assert!(matches!(
            registry.register("on_x", |_| Ok(())),
            Err(EventError::UnknownEvent { name }) if name == "on_x"
        ));

        registry.declare("on_x");
        assert!(registry.register("on_x", |_| Ok(())).is_ok());
    }

    #[test]
    fn test_declare_is_idempotent() {
        let registry = EventRegistry::strict_mode();
        registry.declare("on_x");
        registry.register("on_x", |_| Ok(())).unwrap();
        registry.declare("on_x");
        assert_eq!(registry.listener_count("on_x"), 1);
    }

    #[test]
    fn test_duplicate_listener_fires_twice() {
        let registry = EventRegistry::non_strict();
        let hits = Arc::new(AtomicUsize::new(0));
        let listener: SharedListener = {
            let hits = Arc::clone(&hits);
            Arc::new(move |_: &EventArgs| {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };

        registry.register_shared("on_x", Arc::clone(&listener)).unwrap();
        registry.register_shared("on_x", listener).unwrap();
        registry.call("on_x", &EventArgs::empty()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_error_aborts_remaining_listeners() {
        let registry = EventRegistry::non_strict();
        let hits = Arc::new(AtomicUsize::new(0));

        {
            let hits = Arc::clone(&hits);
            registry
                .register("on_x", move |_| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Err("boom".into())
                })
                .unwrap();
        }
        {
            let hits = Arc::clone(&hits);
            registry
                .register("on_x", move |_| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
        }

        let result = registry.call("on_x", &EventArgs::empty());
        assert!(matches!(
            &result,
            Err(EventError::Listener { event, .. }) if event == "on_x"
        ));
        // the failing listener ran, the one after it did not
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_call_with_zero_listeners_is_noop() {
        let registry = EventRegistry::strict_mode();
        registry.declare("on_silent");
        assert!(registry.call("on_silent", &EventArgs::empty()).is_ok());
    }

    #[test]
    fn test_remove_detaches_one_registration() {
        let registry = EventRegistry::non_strict();
        let token = registry.register("on_x", |_| Ok(())).unwrap();
        registry.register("on_x", |_| Ok(())).unwrap();

        assert_eq!(registry.listener_count("on_x"), 2);
        assert!(registry.remove(token));
        assert_eq!(registry.listener_count("on_x"), 1);
        assert!(!registry.remove(token));
    }

    #[test]
    fn test_registration_during_dispatch_is_not_seen_in_flight() {
        let registry = Arc::new(EventRegistry::non_strict());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner = Arc::clone(&registry);
        let inner_hits = Arc::clone(&hits);
        registry
            .register("on_x", move |_| {
                inner_hits.fetch_add(1, Ordering::SeqCst);
                let hits = Arc::clone(&inner_hits);
                inner
                    .register("on_x", move |_| {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })
                    .unwrap();
                Ok(())
            })
            .unwrap();

        registry.call("on_x", &EventArgs::empty()).unwrap();
        // only the original listener ran during the first dispatch
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        registry.call("on_x", &EventArgs::empty()).unwrap();
        // second dispatch sees both (and registers a third for later)
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
