//! End-to-end tests of the global call-site API and macros.
//!
//! Every test uses its own event types: global registries live for the whole
//! test binary and are never torn down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;

use sigvisor::{Identity, ObjectId, Registry, RegistryConfig, RegistryError, Subscribe};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

type Log = Arc<Mutex<Vec<&'static str>>>;

fn take(log: &Log) -> Vec<&'static str> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn concrete_scenario_with_macros() {
    init_tracing();

    struct E;
    struct CatX;
    struct CatY;

    let log = Log::default();
    let (a, b, c) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
    sigvisor::connect!(E, CatX, 1, move |_: &E| a.lock().unwrap().push("cbA"));
    sigvisor::connect!(E, CatX, 2, move |_: &E| b.lock().unwrap().push("cbB"));
    sigvisor::connect!(E, CatY, 1, move |_: &E| c.lock().unwrap().push("cbC"));

    assert_eq!(sigvisor::signal!(E, E), 3);
    assert_eq!(take(&log), vec!["cbA", "cbB", "cbC"]);

    assert_eq!(sigvisor::disconnect!(E, CatX, 1), 1);
    assert_eq!(sigvisor::signal!(E, E), 2);
    assert_eq!(take(&log), vec!["cbB", "cbC"]);
}

#[test]
fn same_id_under_two_categories_does_not_interfere() {
    struct Refresh;
    struct Panel;
    struct Dock;

    let log = Log::default();
    let l = Arc::clone(&log);
    sigvisor::connect::<Refresh, Panel>(5, move |_| l.lock().unwrap().push("panel"));
    let l = Arc::clone(&log);
    sigvisor::connect::<Refresh, Dock>(5, move |_| l.lock().unwrap().push("dock"));

    assert_eq!(sigvisor::disconnect::<Refresh, Panel>(5), 1);
    assert_eq!(sigvisor::signal(&Refresh), 1);
    assert_eq!(take(&log), vec!["dock"]);
}

#[test]
fn configured_global_registry_is_strict() {
    struct Saved;
    struct Editor;

    let reg = sigvisor::configure::<Saved>(RegistryConfig::with_block_size(2).strict(true))
        .expect("first configure");
    assert!(sigvisor::is_initialized::<Saved>());
    assert!(std::ptr::eq(reg, Registry::<Saved>::global()));

    assert!(sigvisor::try_connect::<Saved, Editor>(1, |_| {}).is_ok());
    assert_eq!(
        sigvisor::try_connect::<Saved, Editor>(1, |_| {}),
        Err(RegistryError::DuplicateIdentity {
            event: std::any::type_name::<Saved>(),
            identity: Identity::of::<Editor>(ObjectId::new(1)),
        })
    );
    assert!(matches!(
        sigvisor::try_connect::<Saved, Editor>(0, |_| {}),
        Err(RegistryError::ReservedId { .. })
    ));
    assert_eq!(sigvisor::signal(&Saved), 1);
}

#[test]
fn try_signal_reports_partial_delivery() {
    init_tracing();

    struct Crash;
    struct Good;
    struct Bad;

    let hits = Arc::new(AtomicUsize::new(0));
    let h = Arc::clone(&hits);
    sigvisor::connect::<Crash, Good>(1, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    sigvisor::connect::<Crash, Bad>(1, |_| panic!("handler failed"));
    let h = Arc::clone(&hits);
    sigvisor::connect::<Crash, Good>(2, move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    let err = sigvisor::try_signal(&Crash).unwrap_err();
    assert!(err.is_partial_delivery());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    sigvisor::disconnect::<Crash, Bad>(1);
    assert_eq!(sigvisor::try_signal(&Crash), Ok(2));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn object_subscribers_connect_under_their_own_type() {
    struct Tick;

    #[derive(Default)]
    struct Counter {
        seen: AtomicUsize,
    }

    impl Subscribe<Tick> for Counter {
        fn on_event(&self, _event: &Tick) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    let counter = Arc::new(Counter::default());
    sigvisor::connect_subscriber::<Tick, Counter>(1, Arc::clone(&counter));
    sigvisor::signal(&Tick);
    sigvisor::signal(&Tick);
    assert_eq!(counter.seen.load(Ordering::SeqCst), 2);

    assert_eq!(sigvisor::disconnect::<Tick, Counter>(1), 1);
    sigvisor::signal(&Tick);
    assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
}

#[test]
fn connects_from_many_threads_are_all_delivered() {
    struct Job;
    struct Worker;

    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 200;

    let hits = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let h = Arc::clone(&hits);
                    sigvisor::connect::<Job, Worker>(t * PER_THREAD + i + 1, move |_| {
                        h.fetch_add(1, Ordering::Relaxed);
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = (THREADS * PER_THREAD) as usize;
    assert_eq!(Registry::<Job>::global().len(), total);
    assert_eq!(sigvisor::signal(&Job), total);
    assert_eq!(hits.load(Ordering::Relaxed), total);

    // Block size 1024: 1600 registrations cross exactly one boundary.
    assert_eq!(Registry::<Job>::global().growth().multiplier(), 2);
}
