//! Main-thread sentinel integration test.
//!
//! This file holds a single test so its thread is guaranteed to be the first in this
//! process to touch the runtime and be adopted as `Main`.

use syncommon::prelude::*;

#[test]
fn the_first_thread_to_touch_the_runtime_is_main() {
    let me = Thread::current().expect("the first toucher must resolve");
    assert_eq!(me.id().as_u64(), 0);
    assert_eq!(me.name(), "Main");
    // The sentinel has no unit of work, so it never reports Alive.
    assert_eq!(me.state(), ThreadState::Stopped);

    // Stable across lookups.
    let again = Thread::current().expect("still resolvable");
    assert_eq!(me, again);

    // Enumerable like any other thread.
    assert!(Thread::enumerate().iter().any(|t| t.id() == me.id()));

    // And interruptible like any other thread.
    assert_eq!(Thread::sleep(Timeout::from_millis(10)), WaitResult::Succeeded);
    me.interrupt();
    assert_eq!(Thread::sleep(Timeout::Infinite), WaitResult::Interrupted);
}
