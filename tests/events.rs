//! Manual-reset event integration tests.
//!
//! The broadcast contract end to end: one signal releases every registered waiter, the
//! state latches for waiters that arrive later, clearing never revokes an outcome already
//! decided, and closing releases everyone with `Abandoned` before the event goes away.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use syncommon::prelude::*;

/// Lets freshly started threads reach their blocking calls.
fn settle() {
    std::thread::sleep(Duration::from_millis(50));
}

/// Spawns `count` runtime threads that all wait on `event` and record their outcome.
fn spawn_waiters(
    event: &Arc<Event>,
    count: usize,
) -> (Vec<Thread>, Vec<Arc<Mutex<Option<WaitResult>>>>) {
    let outcomes: Vec<Arc<Mutex<Option<WaitResult>>>> =
        (0..count).map(|_| Arc::new(Mutex::new(None))).collect();
    let waiters = outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| {
            let event = Arc::clone(event);
            let outcome = Arc::clone(outcome);
            let thread = Thread::named(format!("waiter-{index}"), move || {
                *outcome.lock().unwrap() = Some(event.wait());
            });
            thread.start().expect("failed to spawn");
            thread
        })
        .collect();
    (waiters, outcomes)
}

#[test]
fn one_signal_releases_every_waiter() {
    let event = Arc::new(Event::new(false, "broadcast"));
    let (waiters, outcomes) = spawn_waiters(&event, 4);

    settle();
    event.signal();
    for waiter in &waiters {
        assert_eq!(waiter.join(), WaitResult::Succeeded);
    }
    for outcome in &outcomes {
        assert_eq!(*outcome.lock().unwrap(), Some(WaitResult::Succeeded));
    }
}

#[test]
fn waiters_block_until_the_signal_arrives() {
    let event = Arc::new(Event::new(false, "late-signal"));
    let (waiters, outcomes) = spawn_waiters(&event, 1);

    settle();
    assert!(outcomes[0].lock().unwrap().is_none());

    event.signal();
    assert_eq!(waiters[0].join(), WaitResult::Succeeded);
    assert_eq!(*outcomes[0].lock().unwrap(), Some(WaitResult::Succeeded));
}

#[test]
fn the_signal_latches_for_later_waiters() {
    let event = Arc::new(Event::new(false, "latched"));
    event.signal();

    let start = Instant::now();
    let (waiters, outcomes) = spawn_waiters(&event, 1);
    assert_eq!(waiters[0].join(), WaitResult::Succeeded);
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(*outcomes[0].lock().unwrap(), Some(WaitResult::Succeeded));
}

#[test]
fn clearing_does_not_revoke_decided_outcomes() {
    let event = Arc::new(Event::new(false, "flicker"));
    let (waiters, outcomes) = spawn_waiters(&event, 2);

    settle();
    // Signal and clear back to back; the waiters were released by the signal and keep
    // their outcome even if they resume after the clear.
    event.signal();
    event.clear();

    for waiter in &waiters {
        assert_eq!(waiter.join(), WaitResult::Succeeded);
    }
    for outcome in &outcomes {
        assert_eq!(*outcome.lock().unwrap(), Some(WaitResult::Succeeded));
    }

    // The clear did apply to the state itself.
    assert_eq!(event.wait_for(Timeout::IMMEDIATE), WaitResult::TimedOut);
}

#[test]
fn close_abandons_current_and_future_waiters() {
    let event = Arc::new(Event::new(false, "condemned"));
    let (waiters, outcomes) = spawn_waiters(&event, 3);

    settle();
    event.close();

    for waiter in &waiters {
        assert_eq!(waiter.join(), WaitResult::Succeeded);
    }
    for outcome in &outcomes {
        assert_eq!(*outcome.lock().unwrap(), Some(WaitResult::Abandoned));
    }

    // Arriving after the close is the same story.
    assert_eq!(event.wait(), WaitResult::Abandoned);
    assert_eq!(event.wait_for(Timeout::IMMEDIATE), WaitResult::Abandoned);
}
