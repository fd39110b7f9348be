//! # LogWriter — event logger
//!
//! A minimal subscriber that logs every event it receives through `tracing`
//! at `INFO`. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO sigvisor::subscribers::log: [signal] event="app::Resized" payload=Resized { width: 800 }
//! ```

use std::any::type_name;
use std::fmt::Debug;

use tracing::info;

use crate::subscribers::Subscribe;

/// Event logging subscriber.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<E: Debug + 'static> Subscribe<E> for LogWriter {
    fn on_event(&self, e: &E) {
        info!(event = type_name::<E>(), payload = ?e, "[signal]");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
