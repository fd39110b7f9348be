//! # Subscribers.
//!
//! Plain closures are the usual way to connect to a registry. This module adds
//! the [`Subscribe`] trait for object-style handlers, and (with the `logging`
//! feature) the built-in [`LogWriter`].

#[cfg(feature = "logging")]
mod log;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
