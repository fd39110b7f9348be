//! # sigvisor
//!
//! **sigvisor** is an in-process, type-indexed signal registry for Rust.
//!
//! Every event type `E` gets its own registry: an ordered list of callbacks,
//! each tagged with an identity `(category, object id)`. Signaling an event
//! invokes every callback registered for its type, in registration order,
//! synchronously on the calling thread.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   connect::<E, C>(id, f)      disconnect::<E, C>(id)        signal::<E>(&ev)
//!            │                           │                           │
//!            ▼                           ▼                           ▼
//! ┌───────────────────────────────────────────────────────────────────────────┐
//! │  registry table (process-wide, keyed by TypeId of E, created on demand)   │
//! └──────┬──────────────────────────┬─────────────────────────────┬───────────┘
//!        ▼                          ▼                             ▼
//!  ┌──────────────┐          ┌──────────────┐              ┌──────────────┐
//!  │ Registry<E1> │          │ Registry<E2> │     ...      │ Registry<EN> │
//!  │  [(C,id),f]  │          │  [(C,id),f]  │              │  [(C,id),f]  │
//!  │  [(C,id),f]  │          │     ...      │              │     ...      │
//!  └──────────────┘          └──────────────┘              └──────────────┘
//! ```
//!
//! ### Operations
//! ```text
//! connect    ──► growth check (linear blocks) ──► append at the end
//! disconnect ──► single stable pass, drops every entry matching (C, id)
//! signal     ──► snapshot under lock ──► unlock ──► invoke each callback in order
//!                                                   └─ panic ─► propagates, rest skipped
//! ```
//!
//! ## Caller contracts
//! - Object id `0` is reserved and must not be used.
//! - The registry does not detect duplicates: connecting `(C, id)` twice gives
//!   two registrations; one `disconnect` removes both.
//! - There is no automatic disconnection. A callback that captures state must
//!   be disconnected before that state is destroyed (or use [`connect_scoped`]).
//!
//! The checked variants [`try_connect`] and [`try_signal`] turn some of these
//! contracts into [`RegistryError`]s.
//!
//! ## Features
//! | Area              | Description                                                  | Key types / functions                      |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Registry**      | Per-event-type ordered callback list.                        | [`Registry`], [`Registration`]             |
//! | **Identity**      | Category tags and object ids used as removal keys.           | [`Identity`], [`ObjectId`], [`TypeTag`]    |
//! | **Call sites**    | Global free functions and macros.                            | [`connect`], [`disconnect`], [`signal`]    |
//! | **Growth**        | Linear block growth of registration storage.                 | [`GrowthPolicy`]                           |
//! | **Scoping**       | Disconnect-on-drop handles.                                  | [`ConnectionGuard`]                        |
//! | **Subscribers**   | Object-style handlers.                                       | [`Subscribe`]                              |
//! | **Errors**        | Typed errors for the checked operations.                     | [`RegistryError`]                          |
//! | **Configuration** | Per-registry settings.                                       | [`RegistryConfig`], [`configure`]          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] subscriber _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! struct Resized { width: u32, height: u32 }
//!
//! struct Layout;
//! struct StatusBar;
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//!
//! let l = Arc::clone(&log);
//! sigvisor::connect::<Resized, Layout>(1, move |ev| {
//!     l.lock().unwrap().push(format!("layout {}x{}", ev.width, ev.height));
//! });
//! let l = Arc::clone(&log);
//! sigvisor::connect::<Resized, StatusBar>(1, move |ev| {
//!     l.lock().unwrap().push(format!("status {}", ev.width));
//! });
//!
//! sigvisor::signal(&Resized { width: 800, height: 600 });
//! sigvisor::disconnect::<Resized, Layout>(1);
//! sigvisor::signal(&Resized { width: 640, height: 480 });
//!
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     vec!["layout 800x600", "status 800", "status 640"]
//! );
//! ```
mod api;
mod config;
mod error;
mod identity;
mod macros;
mod registry;
mod subscribers;

// ---- Public re-exports ----

pub use api::{
    connect, connect_scoped, connect_subscriber, disconnect, signal, try_connect, try_signal,
};
pub use config::{DEFAULT_BLOCK_SIZE, RegistryConfig};
pub use error::RegistryError;
pub use identity::{Identity, ObjectId, TypeTag};
pub use registry::{
    Callback, ConnectionGuard, GrowthPolicy, Registration, Registry, configure, is_initialized,
};
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
