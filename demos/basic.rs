//! # Example: basic
//!
//! Minimal walk through the global call-site API.
//!
//! Demonstrates how to:
//! - Connect closures to an event type under `(category, id)` identities.
//! - Signal the event and observe registration-order delivery.
//! - Disconnect one identity and keep the others.
//! - Hold a [`ConnectionGuard`] that disconnects when it goes out of scope.
//!
//! ## Flow
//! ```text
//! connect::<Resized, Layout>(1, f)   ──► Registry<Resized> = [(Layout,1)]
//! connect::<Resized, StatusBar>(1, g) ──► [(Layout,1), (StatusBar,1)]
//! signal(&Resized)                    ──► f(&ev), g(&ev)
//! disconnect::<Resized, Layout>(1)    ──► [(StatusBar,1)]
//! { connect_scoped::<Resized, Overlay>(7, h) } ──► dropped at scope end
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=sigvisor=trace cargo run --example basic
//! ```

use sigvisor::ConnectionGuard;

/// Emitted whenever the main window changes size.
struct Resized {
    width: u32,
    height: u32,
}

struct Layout;
struct StatusBar;
struct Overlay;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Two listeners, two categories, same object id
    sigvisor::connect::<Resized, Layout>(1, |ev| {
        println!("[layout] reflow to {}x{}", ev.width, ev.height);
    });
    sigvisor::connect::<Resized, StatusBar>(1, |ev| {
        println!("[status] width={}", ev.width);
    });

    // 2. Both run, in connect order
    let delivered = sigvisor::signal(&Resized {
        width: 800,
        height: 600,
    });
    println!("delivered to {delivered} callbacks");

    // 3. Removing (Layout, 1) leaves (StatusBar, 1) alone
    let removed = sigvisor::disconnect::<Resized, Layout>(1);
    println!("removed {removed} registration(s)");
    sigvisor::signal(&Resized {
        width: 640,
        height: 480,
    });

    // 4. Scoped connection
    {
        let overlay: ConnectionGuard<'static, Resized> =
            sigvisor::connect_scoped::<Resized, Overlay>(7, |ev| {
                println!("[overlay] repositioned for width={}", ev.width);
            });
        println!("overlay connected as {}", overlay.identity());
        sigvisor::signal(&Resized {
            width: 1024,
            height: 768,
        });
    }

    // 5. Overlay is gone again
    let delivered = sigvisor::signal(&Resized {
        width: 320,
        height: 200,
    });
    println!("delivered to {delivered} callbacks after the overlay went away");
}
