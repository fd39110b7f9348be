//! # Object subscribers.
//!
//! [`Subscribe`] is the extension point for object-style handlers, as an
//! alternative to plain closures. A subscriber is connected through
//! [`Registry::connect_subscriber`](crate::Registry::connect_subscriber) (or
//! [`connect_subscriber`](crate::connect_subscriber)) and uses its own type as
//! the subscriber category.
//!
//! ## Rules
//! - `on_event` runs synchronously on the signaling thread, in registration order.
//! - A panic in `on_event` aborts the rest of that delivery (see `Registry::signal`).
//! - The registry holds an `Arc` of the subscriber until it is disconnected.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use sigvisor::{Registry, Subscribe};
//!
//! struct Saved;
//!
//! #[derive(Default)]
//! struct Autosave { hits: AtomicUsize }
//!
//! impl Subscribe<Saved> for Autosave {
//!     fn on_event(&self, _ev: &Saved) {
//!         self.hits.fetch_add(1, Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str { "autosave" }
//! }
//!
//! let registry = Registry::<Saved>::new();
//! let sub = Arc::new(Autosave::default());
//! registry.connect_subscriber(1, Arc::clone(&sub));
//!
//! registry.signal(&Saved);
//! assert_eq!(sub.hits.load(Ordering::Relaxed), 1);
//! assert_eq!(registry.disconnect::<Autosave>(1), 1);
//! ```

/// Handler for events of type `E`.
pub trait Subscribe<E>: Send + Sync + 'static {
    /// Handles a single event.
    fn on_event(&self, event: &E);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
