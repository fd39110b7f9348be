//! # Per-event-type registry of subscriber callbacks.
//!
//! [`Registry<E>`] owns an ordered list of registrations `(Identity, Callback)`
//! for a single event type `E` and implements the three core operations.
//!
//! ## Architecture
//! ```text
//! connect(id, f) ──► [growth check] ──► entries.push((identity, f)) ──► snapshot = None
//! disconnect(id) ──► stable partition (identity != id) ──► unlock ──► drop removed
//! signal(&ev)    ──► lock ─► snapshot (rebuilt if None) ─► unlock
//!                        └─► for reg in snapshot { (reg.callback)(&ev) }
//! ```
//!
//! ## Rules
//! - **Order**: callbacks run in insertion order; removal keeps the relative
//!   order of survivors.
//! - **No duplicate detection**: connecting an identity twice yields two
//!   registrations; a single `disconnect` removes both.
//! - **Snapshot delivery**: the delivery set is fixed when `signal` starts.
//!   Callbacks may connect, disconnect or signal on any registry (this one
//!   included); such changes apply from the next `signal` on.
//! - **Fail-fast**: a panicking callback unwinds out of `signal` and the
//!   remaining callbacks are skipped. The registry stays consistent because no
//!   lock is held while callbacks run. [`Registry::try_signal`] reports the
//!   panic as [`RegistryError::CallbackPanicked`] instead.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use sigvisor::Registry;
//!
//! struct Resized { width: u32 }
//! struct Layout;
//!
//! let registry = Registry::<Resized>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! registry.connect::<Layout>(1, move |ev| sink.lock().unwrap().push(ev.width));
//!
//! assert_eq!(registry.signal(&Resized { width: 800 }), 1);
//! assert_eq!(registry.disconnect::<Layout>(1), 1);
//! assert_eq!(registry.signal(&Resized { width: 640 }), 0);
//! assert_eq!(*seen.lock().unwrap(), vec![800]);
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::identity::{Identity, ObjectId};
use crate::subscribers::Subscribe;

use super::growth::GrowthPolicy;
use super::guard::ConnectionGuard;

/// Owned, type-erased subscriber callback.
pub type Callback<E> = Arc<dyn Fn(&E) + Send + Sync + 'static>;

/// One stored `(identity, callback)` entry.
pub struct Registration<E> {
    identity: Identity,
    callback: Callback<E>,
}

impl<E> Registration<E> {
    /// Identity the callback was connected under.
    #[inline]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Invokes the callback.
    #[inline]
    pub fn invoke(&self, event: &E) {
        (self.callback)(event)
    }
}

impl<E> Clone for Registration<E> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<E> fmt::Debug for Registration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Cached snapshot taken out of the lock; dropped only after unlocking.
type Stale<E> = Option<Arc<[Registration<E>]>>;

/// Storage guarded by the registry lock.
struct Slots<E> {
    entries: Vec<Registration<E>>,
    growth: GrowthPolicy,
    /// Cached delivery list; `None` after any mutation.
    snapshot: Option<Arc<[Registration<E>]>>,
}

impl<E> Slots<E> {
    /// Appends `registration`; returns the stale snapshot so the caller can drop
    /// it after unlocking, and the new reserved target if storage grew.
    fn push(&mut self, registration: Registration<E>) -> (Stale<E>, Option<usize>) {
        let grown = self.growth.before_push(&mut self.entries);
        self.entries.push(registration);
        (self.snapshot.take(), grown)
    }

    fn snapshot(&mut self) -> Arc<[Registration<E>]> {
        match &self.snapshot {
            Some(snapshot) => Arc::clone(snapshot),
            None => {
                let snapshot: Arc<[Registration<E>]> = self.entries.iter().cloned().collect();
                self.snapshot = Some(Arc::clone(&snapshot));
                snapshot
            }
        }
    }

    fn count(&self, identity: &Identity) -> usize {
        self.entries
            .iter()
            .filter(|r| r.identity == *identity)
            .count()
    }
}

/// Ordered registry of callbacks for event type `E`.
///
/// ### Properties
/// - **Thread-safe**: storage is behind a short-lived `parking_lot::Mutex`.
/// - **Reentrant**: callbacks run without the lock held.
/// - **Linear growth**: storage grows in blocks of [`RegistryConfig::block_size`].
///
/// Use [`Registry::global`] (or the free functions at the crate root) for the
/// process-wide registry of `E`; construct one directly for a scoped registry.
pub struct Registry<E: 'static> {
    config: RegistryConfig,
    slots: Mutex<Slots<E>>,
}

impl<E: 'static> Registry<E> {
    /// Creates a registry with [`RegistryConfig::default`].
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with the given configuration.
    ///
    /// The first storage block is reserved immediately.
    pub fn with_config(config: RegistryConfig) -> Self {
        let growth = GrowthPolicy::new(config.block_size_clamped());
        let mut entries = Vec::new();
        growth.reserve_initial(&mut entries);
        Self {
            config,
            slots: Mutex::new(Slots {
                entries,
                growth,
                snapshot: None,
            }),
        }
    }

    /// Returns the process-wide registry of `E`, creating it on first access.
    #[inline]
    pub fn global() -> &'static Registry<E> {
        super::table::global::<E>()
    }

    /// Configuration this registry was created with.
    #[inline]
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Appends `callback` under the identity `(C, id)`.
    ///
    /// Never fails. Id `0` and repeated identities are accepted as-is; see
    /// [`Registry::try_connect`] for the checked variant.
    pub fn connect<C>(&self, id: u64, callback: impl Fn(&E) + Send + Sync + 'static)
    where
        C: ?Sized + 'static,
    {
        self.connect_identity(Identity::of::<C>(ObjectId::new(id)), Arc::new(callback));
    }

    /// Appends an already type-erased callback under `identity`.
    pub fn connect_identity(&self, identity: Identity, callback: Callback<E>) {
        let mut slots = self.slots.lock();
        let (stale, grown) = slots.push(Registration { identity, callback });
        let len = slots.entries.len();
        let multiplier = slots.growth.multiplier();
        drop(slots);
        drop(stale);

        log_growth::<E>(grown, len, multiplier);
        trace!(event = type_name::<E>(), %identity, len, "connected");
    }

    /// Checked connect.
    ///
    /// # Errors
    /// - [`RegistryError::ReservedId`] if `id == 0`.
    /// - [`RegistryError::DuplicateIdentity`] if the registry is strict and
    ///   `(C, id)` is already connected.
    pub fn try_connect<C>(
        &self,
        id: u64,
        callback: impl Fn(&E) + Send + Sync + 'static,
    ) -> Result<(), RegistryError>
    where
        C: ?Sized + 'static,
    {
        self.try_connect_identity(Identity::of::<C>(ObjectId::new(id)), Arc::new(callback))
    }

    /// Checked connect for an explicit identity. See [`Registry::try_connect`].
    pub fn try_connect_identity(
        &self,
        identity: Identity,
        callback: Callback<E>,
    ) -> Result<(), RegistryError> {
        if identity.object().is_reserved() {
            let err = RegistryError::ReservedId {
                category: identity.category().name(),
            };
            warn!(event = type_name::<E>(), label = err.as_label(), "{}", err.as_message());
            return Err(err);
        }

        let mut slots = self.slots.lock();
        if self.config.strict && slots.count(&identity) > 0 {
            drop(slots);
            let err = RegistryError::DuplicateIdentity {
                event: type_name::<E>(),
                identity,
            };
            warn!(label = err.as_label(), "{}", err.as_message());
            return Err(err);
        }
        let (stale, grown) = slots.push(Registration { identity, callback });
        let len = slots.entries.len();
        let multiplier = slots.growth.multiplier();
        drop(slots);
        drop(stale);

        log_growth::<E>(grown, len, multiplier);
        trace!(event = type_name::<E>(), %identity, len, "connected (checked)");
        Ok(())
    }

    /// Connects `callback` and returns a guard that disconnects `(C, id)` on drop.
    pub fn connect_scoped<C>(
        &self,
        id: u64,
        callback: impl Fn(&E) + Send + Sync + 'static,
    ) -> ConnectionGuard<'_, E>
    where
        C: ?Sized + 'static,
    {
        let identity = Identity::of::<C>(ObjectId::new(id));
        self.connect_identity(identity, Arc::new(callback));
        ConnectionGuard::new(self, identity)
    }

    /// Connects an object subscriber under the category `S` (its own type).
    ///
    /// Disconnect it with `disconnect::<S>(id)`.
    pub fn connect_subscriber<S>(&self, id: u64, subscriber: Arc<S>)
    where
        S: Subscribe<E>,
    {
        let name = subscriber.name();
        let identity = Identity::of::<S>(ObjectId::new(id));
        self.connect_identity(identity, Arc::new(move |ev: &E| subscriber.on_event(ev)));
        debug!(event = type_name::<E>(), subscriber = name, %identity, "subscriber connected");
    }

    /// Removes every registration with identity `(C, id)`.
    ///
    /// Idempotent: returns the number of removed registrations, `0` when none matched.
    pub fn disconnect<C>(&self, id: u64) -> usize
    where
        C: ?Sized + 'static,
    {
        self.disconnect_identity(&Identity::of::<C>(ObjectId::new(id)))
    }

    /// Removes every registration with the given identity.
    ///
    /// Single stable pass: survivors keep their relative order. Removed
    /// callbacks are dropped after the lock is released, so their captured
    /// state may call back into this registry from `Drop`.
    pub fn disconnect_identity(&self, identity: &Identity) -> usize {
        let mut slots = self.slots.lock();
        if !slots.entries.iter().any(|r| r.identity == *identity) {
            let len = slots.entries.len();
            drop(slots);
            trace!(event = type_name::<E>(), %identity, removed = 0, len, "disconnected");
            return 0;
        }

        let entries = std::mem::take(&mut slots.entries);
        let mut kept = Vec::with_capacity(entries.capacity());
        let mut gone = Vec::new();
        for registration in entries {
            if registration.identity == *identity {
                gone.push(registration);
            } else {
                kept.push(registration);
            }
        }
        slots.entries = kept;
        let stale = slots.snapshot.take();
        let len = slots.entries.len();
        drop(slots);

        let removed = gone.len();
        drop(stale);
        drop(gone);
        trace!(event = type_name::<E>(), %identity, removed, len, "disconnected");
        removed
    }

    /// Invokes every registered callback with `event`, in order.
    ///
    /// Returns the number of callbacks invoked. A panicking callback unwinds
    /// to the caller and the remaining callbacks are skipped.
    pub fn signal(&self, event: &E) -> usize {
        let snapshot = self.snapshot();
        for registration in snapshot.iter() {
            registration.invoke(event);
        }
        trace!(event = type_name::<E>(), delivered = snapshot.len(), "signaled");
        snapshot.len()
    }

    /// Like [`Registry::signal`], but catches a callback panic.
    ///
    /// Delivery still stops at the first panicking callback.
    ///
    /// # Errors
    /// [`RegistryError::CallbackPanicked`] naming the failed registration and
    /// how many callbacks completed before it.
    pub fn try_signal(&self, event: &E) -> Result<usize, RegistryError> {
        let snapshot = self.snapshot();
        for (position, registration) in snapshot.iter().enumerate() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| registration.invoke(event))) {
                let err = RegistryError::CallbackPanicked {
                    event: type_name::<E>(),
                    identity: registration.identity,
                    position,
                    delivered: position,
                    message: panic_message(payload.as_ref()),
                };
                warn!(label = err.as_label(), "{}", err.as_message());
                return Err(err);
            }
        }
        Ok(snapshot.len())
    }

    /// Current delivery list (what a `signal` started now would invoke).
    pub fn snapshot(&self) -> Arc<[Registration<E>]> {
        self.slots.lock().snapshot()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    /// True if nothing is connected.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().entries.is_empty()
    }

    /// Reserved storage, in registrations.
    pub fn capacity(&self) -> usize {
        self.slots.lock().entries.capacity()
    }

    /// Current growth state.
    pub fn growth(&self) -> GrowthPolicy {
        self.slots.lock().growth
    }

    /// True if at least one registration has `identity`.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.slots
            .lock()
            .entries
            .iter()
            .any(|r| r.identity == *identity)
    }

    /// Number of registrations with `identity`.
    pub fn count(&self, identity: &Identity) -> usize {
        self.slots.lock().count(identity)
    }

    /// Identities of all registrations, in delivery order.
    pub fn identities(&self) -> Vec<Identity> {
        self.slots
            .lock()
            .entries
            .iter()
            .map(Registration::identity)
            .collect()
    }

    /// Removes every registration. Reserved storage is kept.
    ///
    /// Removed callbacks are dropped after the lock is released.
    pub fn clear(&self) -> usize {
        let mut slots = self.slots.lock();
        let capacity = slots.entries.capacity();
        let gone = std::mem::replace(&mut slots.entries, Vec::with_capacity(capacity));
        let stale = slots.snapshot.take();
        drop(slots);

        let removed = gone.len();
        drop(stale);
        drop(gone);
        debug!(event = type_name::<E>(), removed, "registry cleared");
        removed
    }
}

impl<E: 'static> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.lock();
        f.debug_struct("Registry")
            .field("event", &type_name::<E>())
            .field("len", &slots.entries.len())
            .field("capacity", &slots.entries.capacity())
            .field("config", &self.config)
            .finish()
    }
}

/// Reports a storage growth step, if one happened.
fn log_growth<E>(grown: Option<usize>, len: usize, multiplier: usize) {
    if let Some(reserved) = grown {
        debug!(
            event = type_name::<E>(),
            len,
            reserved,
            multiplier,
            "registry storage grown"
        );
    }
}

/// Renders a panic payload as text.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown".to_string()
    }
}
