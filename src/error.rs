//! Error types used by the sigvisor registries.
//!
//! The plain operations (`connect`, `disconnect`, `signal`) never fail: misuse
//! such as connecting the reserved id or forgetting to disconnect is a caller
//! contract, not a checked error. [`RegistryError`] is only produced by the
//! opt-in checked variants (`try_connect`, `try_signal`) and by
//! [`configure`](crate::configure).
//!
//! Like the other error enums in this crate family it provides `as_label` and
//! `as_message` helpers for logging.

use thiserror::Error;

use crate::identity::Identity;

/// # Errors produced by the checked registry operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The reserved object id `0` was passed to a checked connect.
    #[error("object id 0 is reserved (category {category})")]
    ReservedId {
        /// Name of the subscriber category that used the reserved id.
        category: &'static str,
    },

    /// A strict registry already holds a live registration for this identity.
    #[error("identity {identity} is already connected to {event}")]
    DuplicateIdentity {
        /// Event type name of the registry.
        event: &'static str,
        /// The identity that was connected twice.
        identity: Identity,
    },

    /// A callback panicked during a checked signal; delivery stopped there.
    #[error(
        "callback {identity} panicked while handling {event} at position {position} \
         ({delivered} delivered): {message}"
    )]
    CallbackPanicked {
        /// Event type name of the registry.
        event: &'static str,
        /// Identity of the panicking registration.
        identity: Identity,
        /// Zero-based position of the registration in the delivery snapshot.
        position: usize,
        /// Number of callbacks that completed before the panic.
        delivered: usize,
        /// Panic payload rendered as text (or `"unknown"`).
        message: String,
    },

    /// The global registry for this event type exists; its config can no longer change.
    #[error("registry for {event} is already initialized")]
    AlreadyInitialized {
        /// Event type name of the registry.
        event: &'static str,
    },
}

impl RegistryError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use sigvisor::RegistryError;
    ///
    /// let err = RegistryError::ReservedId { category: "ui" };
    /// assert_eq!(err.as_label(), "registry_reserved_id");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistryError::ReservedId { .. } => "registry_reserved_id",
            RegistryError::DuplicateIdentity { .. } => "registry_duplicate_identity",
            RegistryError::CallbackPanicked { .. } => "registry_callback_panicked",
            RegistryError::AlreadyInitialized { .. } => "registry_already_initialized",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegistryError::ReservedId { category } => {
                format!("reserved id: category={category}")
            }
            RegistryError::DuplicateIdentity { event, identity } => {
                format!("duplicate: event={event} identity={identity}")
            }
            RegistryError::CallbackPanicked {
                event,
                identity,
                position,
                delivered,
                message,
            } => format!(
                "panic: event={event} identity={identity} position={position} \
                 delivered={delivered} info={message}"
            ),
            RegistryError::AlreadyInitialized { event } => {
                format!("already initialized: event={event}")
            }
        }
    }

    /// Indicates whether the event was only partially delivered.
    ///
    /// Returns `true` only for [`RegistryError::CallbackPanicked`].
    pub fn is_partial_delivery(&self) -> bool {
        matches!(self, RegistryError::CallbackPanicked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Identity, ObjectId};

    struct Ui;

    #[test]
    fn test_labels_are_stable() {
        let id = Identity::of::<Ui>(ObjectId::new(3));
        let errors = [
            (RegistryError::ReservedId { category: "ui" }, "registry_reserved_id"),
            (
                RegistryError::DuplicateIdentity {
                    event: "Tick",
                    identity: id,
                },
                "registry_duplicate_identity",
            ),
            (
                RegistryError::AlreadyInitialized { event: "Tick" },
                "registry_already_initialized",
            ),
        ];
        for (err, label) in errors {
            assert_eq!(err.as_label(), label);
            assert!(!err.is_partial_delivery());
        }
    }

    #[test]
    fn test_panic_error_reports_partial_delivery() {
        let err = RegistryError::CallbackPanicked {
            event: "Tick",
            identity: Identity::of::<Ui>(ObjectId::new(7)),
            position: 2,
            delivered: 2,
            message: "boom".into(),
        };
        assert!(err.is_partial_delivery());
        assert!(err.as_message().contains("delivered=2"));
        assert!(err.to_string().contains("boom"));
    }
}
