//! Interruption contract integration tests.
//!
//! These tests drive the full path an interrupt request takes: a handle held by one
//! thread, the latched token of another, and the blocking call that finally observes it.
//! Each scenario asserts both the outcome the blocked thread saw and the state the
//! resource was left in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use syncommon::prelude::*;

/// Lets a freshly started thread reach its blocking call.
fn settle() {
    std::thread::sleep(Duration::from_millis(50));
}

/// Spawns a runtime thread running `work` and records what the wait inside it returned.
fn spawn_recorded(
    name: &str,
    work: impl FnOnce() -> WaitResult + Send + 'static,
) -> (Thread, Arc<Mutex<Option<WaitResult>>>) {
    let outcome = Arc::new(Mutex::new(None));
    let thread = {
        let outcome = Arc::clone(&outcome);
        Thread::named(name, move || {
            *outcome.lock().unwrap() = Some(work());
        })
    };
    thread.start().expect("failed to spawn");
    (thread, outcome)
}

fn recorded(outcome: &Arc<Mutex<Option<WaitResult>>>) -> WaitResult {
    outcome.lock().unwrap().expect("no outcome recorded")
}

#[test]
fn interrupt_wakes_a_blocked_acquire() {
    let pool = Arc::new(Semaphore::named("empty-pool", 0));
    let (thread, outcome) = spawn_recorded("acquirer", {
        let pool = Arc::clone(&pool);
        move || pool.acquire()
    });

    settle();
    thread.interrupt();
    assert_eq!(thread.join(), WaitResult::Succeeded);
    assert_eq!(recorded(&outcome), WaitResult::Interrupted);
    // The pool was not corrupted by the aborted wait.
    assert_eq!(pool.available_permits(), 0);
}

#[test]
fn interrupt_wakes_a_blocked_event_wait() {
    let gate = Arc::new(Event::new(false, "never-opened"));
    let (thread, outcome) = spawn_recorded("waiter", {
        let gate = Arc::clone(&gate);
        move || gate.wait()
    });

    settle();
    thread.interrupt();
    assert_eq!(thread.join(), WaitResult::Succeeded);
    assert_eq!(recorded(&outcome), WaitResult::Interrupted);
    // The event is still unsignaled.
    assert_eq!(gate.wait_for(Timeout::IMMEDIATE), WaitResult::TimedOut);
}

#[test]
fn interrupt_wakes_a_sleeper_well_before_its_deadline() {
    let (thread, outcome) = spawn_recorded("sleeper", || {
        Thread::sleep(Timeout::from_millis(60_000))
    });

    settle();
    let start = Instant::now();
    thread.interrupt();
    assert_eq!(thread.join(), WaitResult::Succeeded);
    assert!(start.elapsed() < Duration::from_secs(10));
    assert_eq!(recorded(&outcome), WaitResult::Interrupted);
}

#[test]
fn interrupt_wakes_a_blocked_joiner_without_touching_the_target() {
    let hold = Arc::new(Event::new(false, "hold-target"));
    let target = {
        let hold = Arc::clone(&hold);
        Thread::named("target", move || {
            hold.wait();
        })
    };
    target.start().expect("failed to spawn");

    let (joiner, outcome) = spawn_recorded("joiner", {
        let target = target.clone();
        move || target.join()
    });

    settle();
    joiner.interrupt();
    assert_eq!(joiner.join(), WaitResult::Succeeded);
    assert_eq!(recorded(&outcome), WaitResult::Interrupted);

    // The target kept running and stays joinable.
    assert!(target.is_alive());
    hold.signal();
    assert_eq!(target.join(), WaitResult::Succeeded);
}

#[test]
fn a_request_latches_while_the_thread_is_busy() {
    let busy = Arc::new(AtomicBool::new(true));
    let (thread, outcome) = spawn_recorded("number-cruncher", {
        let busy = Arc::clone(&busy);
        move || {
            while busy.load(Ordering::Acquire) {
                std::hint::spin_loop();
            }
            Thread::sleep(Timeout::from_millis(60_000))
        }
    });

    settle();
    // Aimed while the thread is computing, not waiting.
    thread.interrupt();
    busy.store(false, Ordering::Release);

    assert_eq!(thread.join(), WaitResult::Succeeded);
    assert_eq!(recorded(&outcome), WaitResult::Interrupted);
}

#[test]
fn one_request_interrupts_exactly_one_wait() {
    let outcomes = Arc::new(Mutex::new(None));
    let thread = {
        let outcomes = Arc::clone(&outcomes);
        Thread::named("twice-blocked", move || {
            let first = Thread::sleep(Timeout::Infinite);
            let second = Thread::sleep(Timeout::from_millis(20));
            *outcomes.lock().unwrap() = Some((first, second));
        })
    };
    thread.start().expect("failed to spawn");

    settle();
    thread.interrupt();
    assert_eq!(thread.join(), WaitResult::Succeeded);
    assert_eq!(
        *outcomes.lock().unwrap(),
        Some((WaitResult::Interrupted, WaitResult::Succeeded))
    );
}

#[test]
fn an_available_resource_outranks_a_pending_request() {
    let open = Arc::new(Event::new(true, "already-open"));
    let outcomes = Arc::new(Mutex::new(None));
    let thread = {
        let open = Arc::clone(&open);
        let outcomes = Arc::clone(&outcomes);
        Thread::named("lucky-waiter", move || {
            let first = open.wait_for(Timeout::IMMEDIATE);
            let second = Thread::sleep(Timeout::from_millis(60_000));
            *outcomes.lock().unwrap() = Some((first, second));
        })
    };

    // Latched before the thread even starts.
    thread.interrupt();
    thread.start().expect("failed to spawn");

    assert_eq!(thread.join(), WaitResult::Succeeded);
    // The satisfied wait reported success; the request survived it and cut the sleep short.
    assert_eq!(
        *outcomes.lock().unwrap(),
        Some((WaitResult::Succeeded, WaitResult::Interrupted))
    );
}
