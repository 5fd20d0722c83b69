#![allow(unused)]
extern crate syncommon;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use syncommon::{Event, Lock, Semaphore, Thread, Timeout, WaitResult};

/// Benchmark the uncontended acquire/release cycle on a semaphore.
///
/// This is the hot path of a permit pool in steady state: no waiter registration, just the
/// counter under its lock plus the identity lookup at the top of every wait.
fn bench_semaphore_uncontended(c: &mut Criterion) {
    let pool = Semaphore::named("bench-pool", 1);
    c.bench_function("semaphore_acquire_release", |b| {
        b.iter(|| {
            black_box(pool.acquire());
            black_box(pool.release());
        });
    });
}

/// Benchmark polling a signaled event, the fast path every wait starts with.
fn bench_event_poll(c: &mut Criterion) {
    let gate = Event::new(true, "bench-gate");
    c.bench_function("event_poll_signaled", |b| {
        b.iter(|| black_box(gate.wait_for(Timeout::IMMEDIATE)));
    });
}

/// Benchmark an uncontended reentrant lock round trip.
fn bench_lock_uncontended(c: &mut Criterion) {
    let lock = Lock::new();
    c.bench_function("lock_uncontended", |b| {
        b.iter(|| {
            let guard = lock.lock();
            black_box(&guard);
        });
    });
}

/// Benchmark resolving the calling thread's identity, paid at the top of every wait.
fn bench_current_thread(c: &mut Criterion) {
    // Warm the registry so the measurement excludes one-time initialization.
    let _ = Thread::enumerate();
    c.bench_function("thread_current", |b| {
        b.iter(|| black_box(Thread::current()));
    });
}

criterion_group!(
    benches,
    bench_semaphore_uncontended,
    bench_event_poll,
    bench_lock_uncontended,
    bench_current_thread
);
criterion_main!(benches);
