//! Stress tests for concurrent routing
//!
//! These tests verify:
//! - Gate loads never observe a torn or unstored value
//! - Stores on one thread are visible to loads on another
//! - Shared sinks stay isolated under concurrent context extension

use rust_log_router::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

/// Spawn `threads` threads that each run `f` `iterations` times once the
/// barrier opens
fn run_concurrently<F>(
    threads: usize,
    iterations: usize,
    barrier: &Arc<Barrier>,
    f: F,
) -> Vec<thread::JoinHandle<()>>
where
    F: Fn() + Send + Sync + 'static,
{
    let f = Arc::new(f);
    (0..threads)
        .map(|_| {
            let f = Arc::clone(&f);
            let barrier = Arc::clone(barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..iterations {
                    f();
                }
            })
        })
        .collect()
}

#[test]
fn test_gate_mutation_without_tearing() {
    let gate = SeverityGate::new();
    gate.store(Severity::Warn);

    let barrier = Arc::new(Barrier::new(20));
    let reader = gate.clone();
    let mut handles = run_concurrently(10, 100, &barrier, move || {
        assert_eq!(reader.load(), Severity::Warn);
    });
    let writer = gate.clone();
    handles.extend(run_concurrently(10, 100, &barrier, move || {
        writer.store(Severity::Warn);
    }));

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    assert_eq!(gate.load(), Severity::Warn);
}

#[test]
fn test_gate_loads_only_see_stored_values() {
    let gate = SeverityGate::at(Severity::Error);
    let allowed = [Severity::Error, Severity::Debug, Severity::None];

    let barrier = Arc::new(Barrier::new(8));
    let mut handles = Vec::new();
    for (idx, level) in allowed.into_iter().enumerate() {
        let writer = gate.clone();
        handles.extend(run_concurrently(1 + idx % 2, 500, &barrier, move || {
            writer.store(level);
        }));
    }
    let reader = gate.clone();
    handles.extend(run_concurrently(4, 1000, &barrier, move || {
        let seen = reader.load();
        assert!(allowed.contains(&seen), "observed unstored level {}", seen);
    }));

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_store_visible_across_threads() {
    let gate = SeverityGate::new();
    let writer = gate.clone();
    thread::spawn(move || writer.store(Severity::Fatal))
        .join()
        .expect("writer panicked");
    assert_eq!(gate.load(), Severity::Fatal);
    assert!(!gate.enabled(Severity::None));
}

#[test]
fn test_concurrent_context_extension() {
    let client = Arc::new(MemoryClient::new());
    let root: Arc<dyn Sink> = Arc::new(PayloadSink::new(client.clone(), Severity::Debug));
    let logger = Logger::new(root);

    let handles: Vec<_> = (0..8i64)
        .map(|worker| {
            let logger = logger.with(&[Field::i64("worker", worker)]);
            thread::spawn(move || {
                for i in 0..50 {
                    let scoped = logger.with(&[Field::i64("iteration", i)]);
                    scoped.info("tick", &[]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let docs = client.documents();
    assert_eq!(docs.len(), 400);
    for doc in &docs {
        assert_eq!(doc.len(), 4, "worker, iteration and the two reserved keys");
    }
    assert_eq!(logger.metrics().written_count(), 400);
}
