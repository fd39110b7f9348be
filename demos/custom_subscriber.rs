//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach an object-style subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait for a stateful type.
//! - Connect it with [`sigvisor::connect_subscriber`] under its own type as category.
//! - Use [`sigvisor::try_signal`] to survive a panicking handler.
//!
//! ## Flow
//! ```text
//! connect_subscriber::<Saved, Autosave>(1, Arc<Autosave>)
//! connect::<Saved, Flaky>(1, f)                 (panics on purpose)
//! try_signal(&Saved) ──► Autosave.on_event() ──► f panics ──► Err(CallbackPanicked)
//! disconnect::<Saved, Flaky>(1)
//! try_signal(&Saved) ──► Ok(1)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sigvisor::Subscribe;

/// A document was written to disk.
struct Saved {
    path: &'static str,
    bytes: usize,
}

/// Counts saves and the total number of bytes written.
#[derive(Default)]
struct Autosave {
    saves: AtomicUsize,
    bytes: AtomicUsize,
}

impl Subscribe<Saved> for Autosave {
    fn on_event(&self, ev: &Saved) {
        let n = self.saves.fetch_add(1, Ordering::Relaxed) + 1;
        self.bytes.fetch_add(ev.bytes, Ordering::Relaxed);
        println!("[autosave] #{n}: {} ({} bytes)", ev.path, ev.bytes);
    }

    fn name(&self) -> &'static str {
        "autosave"
    }
}

/// A handler that always fails.
struct Flaky;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Keep the default panic message out of the demo output.
    std::panic::set_hook(Box::new(|_| {}));

    let autosave = Arc::new(Autosave::default());
    sigvisor::connect_subscriber::<Saved, Autosave>(1, Arc::clone(&autosave));
    sigvisor::connect::<Saved, Flaky>(1, |_| panic!("disk quota exceeded"));

    let saved = Saved {
        path: "notes.txt",
        bytes: 512,
    };
    match sigvisor::try_signal(&saved) {
        Ok(n) => println!("delivered to {n} callbacks"),
        Err(err) => println!("[{}] {}", err.as_label(), err),
    }

    sigvisor::disconnect::<Saved, Flaky>(1);
    let saved = Saved {
        path: "todo.md",
        bytes: 128,
    };
    if let Ok(n) = sigvisor::try_signal(&saved) {
        println!("delivered to {n} callbacks");
    }

    println!(
        "[autosave] total: {} saves, {} bytes",
        autosave.saves.load(Ordering::Relaxed),
        autosave.bytes.load(Ordering::Relaxed)
    );
}
