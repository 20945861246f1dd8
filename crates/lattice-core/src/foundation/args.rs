//! Type-erased event payloads.
//!
//! Events are dispatched by name, so the registry cannot know the payload
//! type of any particular event. [`EventArgs`] wraps an arbitrary value in an
//! `Arc` so it can be handed to every listener of a dispatch — each listener
//! downcasts to the concrete type it expects.
//!
//! # Example
//!
//! ```rust,ignore
//! use lattice_core::EventArgs;
//!
//! struct Tick { count: u64 }
//!
//! let args = EventArgs::new(Tick { count: 7 });
//! registry.call("on_tick", &args)?;
//!
//! // Inside a listener:
//! fn on_tick(args: &EventArgs) -> Result<(), BoxError> {
//!     if let Some(tick) = args.downcast_ref::<Tick>() {
//!         println!("tick {}", tick.count);
//!     }
//!     Ok(())
//! }
//! ```

use std::any::Any;
use std::sync::Arc;

/// A type-erased, shareable event payload.
///
/// Cloning is cheap (`Arc` bump) and every clone refers to the same value, so
/// all listeners of one dispatch observe the identical payload.
#[derive(Clone)]
pub struct EventArgs {
    inner: Arc<dyn Any + Send + Sync>,
}

impl EventArgs {
    /// Wraps `value` as an event payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// An empty payload, for events that carry no data.
    pub fn empty() -> Self {
        Self::new(())
    }

    /// Returns `true` if the payload is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is::<T>()
    }

    /// Attempts to downcast the payload to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref().downcast_ref()
    }
}

impl Default for EventArgs {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EventArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventArgs")
            .field("type_id", &self.inner.as_ref().type_id())
            .finish()
    }
}
