//! Event registries: per-type storage, growth policy, global table and guards.
//!
//! ## Contents
//! - [`Registry`] ordered `(identity, callback)` list for one event type
//! - [`GrowthPolicy`] linear block growth of registry storage
//! - [`ConnectionGuard`] disconnect-on-drop handle
//! - [`configure`] / [`is_initialized`] process-wide table of registries
//!
//! ## Quick wiring
//! ```text
//! sigvisor::connect::<E, C>(id, f)
//!      └─► Registry::<E>::global()      (table lookup, created on first use)
//!           └─► Registry::connect::<C>(id, f)
//! ```

mod event_registry;
mod growth;
mod guard;
mod table;

pub use event_registry::{Callback, Registration, Registry};
pub use growth::GrowthPolicy;
pub use guard::ConnectionGuard;
pub use table::{configure, is_initialized};
