//! # Scoped connections.
//!
//! [`ConnectionGuard`] disconnects its identity when dropped, so a subscriber
//! that owns the guard cannot outlive its registration by accident.
//!
//! ## Rules
//! - Dropping the guard removes **every** registration with the guard's
//!   identity, including ones connected separately under the same identity.
//! - [`ConnectionGuard::forget`] keeps the registration and disarms the guard.

use std::fmt;

use crate::identity::Identity;

use super::Registry;

/// Disconnects an identity from a registry on drop.
///
/// # Example
/// ```
/// use sigvisor::Registry;
///
/// struct Saved;
/// struct Toolbar;
///
/// let registry = Registry::<Saved>::new();
/// {
///     let _guard = registry.connect_scoped::<Toolbar>(1, |_| {});
///     assert_eq!(registry.len(), 1);
/// }
/// assert!(registry.is_empty());
/// ```
#[must_use = "dropping the guard disconnects the callback immediately"]
pub struct ConnectionGuard<'r, E: 'static> {
    registry: &'r Registry<E>,
    identity: Identity,
    armed: bool,
}

impl<'r, E: 'static> ConnectionGuard<'r, E> {
    pub(crate) fn new(registry: &'r Registry<E>, identity: Identity) -> Self {
        Self {
            registry,
            identity,
            armed: true,
        }
    }

    /// Identity this guard disconnects.
    #[inline]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Disconnects now; returns the number of removed registrations.
    pub fn disconnect(mut self) -> usize {
        self.armed = false;
        self.registry.disconnect_identity(&self.identity)
    }

    /// Disarms the guard, leaving the registration connected.
    ///
    /// The caller takes over the obligation to disconnect the returned identity.
    pub fn forget(mut self) -> Identity {
        self.armed = false;
        self.identity
    }
}

impl<E: 'static> Drop for ConnectionGuard<'_, E> {
    fn drop(&mut self) {
        if self.armed {
            self.registry.disconnect_identity(&self.identity);
        }
    }
}

impl<E: 'static> fmt::Debug for ConnectionGuard<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("identity", &self.identity)
            .field("armed", &self.armed)
            .finish()
    }
}
