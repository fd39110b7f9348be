//! # Process-wide registry table.
//!
//! One [`Registry<E>`] per event type, keyed by the event's [`TypeId`].
//!
//! ## Rules
//! - A registry is created on first lookup (or by [`configure`]) and lives
//!   until process exit; it is leaked on purpose and holds no external
//!   resources, so no teardown exists.
//! - Creation happens under the table's write lock, so concurrent first
//!   lookups agree on a single instance.
//! - Lookups of already created registries take the read lock only.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::RegistryError;

use super::Registry;

type Erased = &'static (dyn Any + Send + Sync);

static TABLE: LazyLock<RwLock<HashMap<TypeId, Erased>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn lookup<E: 'static>(table: &HashMap<TypeId, Erased>) -> Option<&'static Registry<E>> {
    table
        .get(&TypeId::of::<E>())
        .copied()
        .and_then(|erased| erased.downcast_ref::<Registry<E>>())
}

fn create<E: 'static>(
    table: &mut HashMap<TypeId, Erased>,
    config: RegistryConfig,
) -> &'static Registry<E> {
    let registry: &'static Registry<E> = Box::leak(Box::new(Registry::with_config(config)));
    table.insert(TypeId::of::<E>(), registry);
    registry
}

fn log_created<E: 'static>(config: RegistryConfig) {
    debug!(
        event = type_name::<E>(),
        block_size = config.block_size_clamped(),
        strict = config.strict,
        "registry created"
    );
}

/// Returns the global registry of `E`, creating it with the default config.
pub(crate) fn global<E: 'static>() -> &'static Registry<E> {
    if let Some(registry) = lookup::<E>(&TABLE.read()) {
        return registry;
    }
    let mut table = TABLE.write();
    if let Some(registry) = lookup::<E>(&table) {
        return registry;
    }
    let config = RegistryConfig::default();
    let registry = create::<E>(&mut table, config);
    drop(table);

    log_created::<E>(config);
    registry
}

/// Creates the global registry of `E` with `config`.
///
/// Must run before anything else touches the registry of `E`.
///
/// # Errors
/// [`RegistryError::AlreadyInitialized`] if the registry already exists; the
/// existing registry keeps its config.
///
/// # Example
/// ```
/// use sigvisor::{RegistryConfig, configure};
///
/// struct Frame;
///
/// let registry = configure::<Frame>(RegistryConfig::with_block_size(64)).unwrap();
/// assert_eq!(registry.config().block_size, 64);
/// assert!(configure::<Frame>(RegistryConfig::default()).is_err());
/// ```
pub fn configure<E: 'static>(
    config: RegistryConfig,
) -> Result<&'static Registry<E>, RegistryError> {
    let mut table = TABLE.write();
    if lookup::<E>(&table).is_some() {
        return Err(RegistryError::AlreadyInitialized {
            event: type_name::<E>(),
        });
    }
    let registry = create::<E>(&mut table, config);
    drop(table);

    log_created::<E>(config);
    Ok(registry)
}

/// True once the global registry of `E` exists.
pub fn is_initialized<E: 'static>() -> bool {
    lookup::<E>(&TABLE.read()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unused;
    struct Shared;
    struct Configured;

    #[test]
    fn test_lookup_does_not_create() {
        assert!(!is_initialized::<Unused>());
    }

    #[test]
    fn test_global_is_a_singleton() {
        let a = global::<Shared>();
        let b = global::<Shared>();
        assert!(std::ptr::eq(a, b));
        assert!(is_initialized::<Shared>());
    }

    #[test]
    fn test_configure_once() {
        let reg = configure::<Configured>(RegistryConfig::with_block_size(8).strict(true)).unwrap();
        assert!(reg.config().strict);
        assert!(std::ptr::eq(reg, global::<Configured>()));

        let err = configure::<Configured>(RegistryConfig::default()).unwrap_err();
        assert_eq!(err.as_label(), "registry_already_initialized");
        assert_eq!(global::<Configured>().config().block_size, 8);
    }

    #[test]
    fn test_creation_is_logged_after_table_lock_release() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::mpsc;
        use std::time::Duration;

        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        struct Created;

        /// Reads the table from inside every log event.
        struct TableReader(&'static AtomicUsize);

        impl<S: tracing::Subscriber> Layer<S> for TableReader {
            fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if is_initialized::<Created>() {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        static SEEN: AtomicUsize = AtomicUsize::new(0);

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let subscriber = tracing_subscriber::registry().with(TableReader(&SEEN));
            tracing::subscriber::with_default(subscriber, || {
                let _ = global::<Created>();
            });
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("registry creation did not return");
        assert!(SEEN.load(Ordering::SeqCst) >= 1);
    }
}
