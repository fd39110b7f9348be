//! # Call-site API over the global registries.
//!
//! Each function resolves the process-wide [`Registry<E>`] (creating it on
//! first use) and forwards to it. `C` is the subscriber category; use `()` for
//! free-standing callbacks.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! struct VolumeChanged(u32);
//! struct Taskbar;
//!
//! let level = Arc::new(AtomicU32::new(0));
//! let sink = Arc::clone(&level);
//! sigvisor::connect::<VolumeChanged, Taskbar>(1, move |ev| sink.store(ev.0, Ordering::Relaxed));
//!
//! assert_eq!(sigvisor::signal(&VolumeChanged(40)), 1);
//! assert_eq!(level.load(Ordering::Relaxed), 40);
//!
//! // Must run before the captured state goes away.
//! sigvisor::disconnect::<VolumeChanged, Taskbar>(1);
//! assert_eq!(sigvisor::signal(&VolumeChanged(0)), 0);
//! ```

use std::sync::Arc;

use crate::error::RegistryError;
use crate::registry::{ConnectionGuard, Registry};
use crate::subscribers::Subscribe;

/// Registers `callback` for events `E` under the identity `(C, id)`.
///
/// Never fails. `id` must be non-zero and unique within `C` while connected;
/// neither is checked (see [`try_connect`]).
pub fn connect<E, C>(id: u64, callback: impl Fn(&E) + Send + Sync + 'static)
where
    E: 'static,
    C: ?Sized + 'static,
{
    Registry::<E>::global().connect::<C>(id, callback);
}

/// Checked variant of [`connect`].
///
/// # Errors
/// See [`Registry::try_connect`].
pub fn try_connect<E, C>(
    id: u64,
    callback: impl Fn(&E) + Send + Sync + 'static,
) -> Result<(), RegistryError>
where
    E: 'static,
    C: ?Sized + 'static,
{
    Registry::<E>::global().try_connect::<C>(id, callback)
}

/// Registers `callback` and returns a guard that disconnects `(C, id)` on drop.
pub fn connect_scoped<E, C>(
    id: u64,
    callback: impl Fn(&E) + Send + Sync + 'static,
) -> ConnectionGuard<'static, E>
where
    E: 'static,
    C: ?Sized + 'static,
{
    Registry::<E>::global().connect_scoped::<C>(id, callback)
}

/// Registers an object subscriber under its own type as category.
pub fn connect_subscriber<E, S>(id: u64, subscriber: Arc<S>)
where
    E: 'static,
    S: Subscribe<E>,
{
    Registry::<E>::global().connect_subscriber(id, subscriber);
}

/// Removes every registration of `(C, id)` for events `E`.
///
/// Must be called before state captured by the callback is destroyed. Safe to
/// call when nothing is connected; returns the number of removed registrations.
pub fn disconnect<E, C>(id: u64) -> usize
where
    E: 'static,
    C: ?Sized + 'static,
{
    Registry::<E>::global().disconnect::<C>(id)
}

/// Delivers `event` to every callback registered for `E`, in order.
///
/// Returns the number of callbacks invoked. A panicking callback propagates
/// to the caller; the remaining callbacks are skipped.
pub fn signal<E: 'static>(event: &E) -> usize {
    Registry::<E>::global().signal(event)
}

/// Like [`signal`], but reports a callback panic as an error.
///
/// # Errors
/// [`RegistryError::CallbackPanicked`].
pub fn try_signal<E: 'static>(event: &E) -> Result<usize, RegistryError> {
    Registry::<E>::global().try_signal(event)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::identity::{Identity, ObjectId};

    struct Opened(&'static str);
    struct Closed;
    struct Sidebar;
    struct Tabs;

    #[test]
    fn test_event_types_are_independent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = Arc::clone(&log);
        connect::<Opened, Sidebar>(1, move |ev| l.lock().unwrap().push(ev.0));
        let l = Arc::clone(&log);
        connect::<Closed, Sidebar>(1, move |_| l.lock().unwrap().push("closed"));

        assert_eq!(signal(&Opened("a.txt")), 1);
        assert_eq!(disconnect::<Closed, Sidebar>(1), 1);
        assert_eq!(signal(&Opened("b.txt")), 1);
        assert_eq!(signal(&Closed), 0);
        assert_eq!(*log.lock().unwrap(), vec!["a.txt", "b.txt"]);

        assert_eq!(disconnect::<Opened, Sidebar>(1), 1);
    }

    #[test]
    fn test_scoped_global_connection() {
        struct Scrolled;
        {
            let _guard = connect_scoped::<Scrolled, Tabs>(2, |_| {});
            assert!(
                Registry::<Scrolled>::global().contains(&Identity::of::<Tabs>(ObjectId::new(2)))
            );
            assert_eq!(signal(&Scrolled), 1);
        }
        assert_eq!(signal(&Scrolled), 0);
    }
}
