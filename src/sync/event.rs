//! Manual-reset events.

use std::fmt;

use tracing::debug;

use crate::sync::{Timeout, WaitResult};
use crate::sys::RawEvent;
use crate::thread::Thread;

/// A manual-reset signal that any number of threads can wait on.
///
/// The event holds a boolean state. [`signal`](Event::signal) latches it and releases every
/// waiter at once; the state stays set, so later waits return immediately until
/// [`clear`](Event::clear) resets it. Clearing has no effect on waiters already released by
/// an earlier signal.
///
/// Waits performed by a runtime [`Thread`] are interruptible: [`Thread::interrupt`] wakes the
/// waiter with [`WaitResult::Interrupted`] and leaves the event state untouched. Threads not
/// created through the runtime wait uninterruptibly.
///
/// [`close`](Event::close) retires the event. Every current waiter is released with
/// [`WaitResult::Abandoned`], as is every wait attempted afterwards, and `close` does not
/// return until the last released waiter has left the event. Dropping the event closes it.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Event, Timeout, WaitResult};
///
/// let ready = Event::new(false, "config-loaded");
/// assert_eq!(ready.wait_for(Timeout::IMMEDIATE), WaitResult::TimedOut);
///
/// ready.signal();
/// assert_eq!(ready.wait(), WaitResult::Succeeded);
/// assert_eq!(ready.wait(), WaitResult::Succeeded);
/// ```
pub struct Event {
    raw: RawEvent,
    name: String,
}

impl Event {
    /// Creates an event with the given initial state and a diagnostic name.
    pub fn new(signaled: bool, name: impl Into<String>) -> Event {
        Event {
            raw: RawEvent::new(signaled),
            name: name.into(),
        }
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the event, releasing every current waiter with [`WaitResult::Succeeded`].
    ///
    /// The state stays set until [`clear`](Event::clear), so signaling is never lost between
    /// waits. Signaling a closed or already signaled event has no effect.
    pub fn signal(&self) {
        self.raw.signal();
    }

    /// Resets the event so that subsequent waits block again.
    ///
    /// Waiters released by an earlier [`signal`](Event::signal) keep their outcome even if
    /// they have not resumed running yet.
    pub fn clear(&self) {
        self.raw.clear();
    }

    /// Blocks until the event is signaled, the event is closed, or the calling thread is
    /// interrupted.
    pub fn wait(&self) -> WaitResult {
        self.wait_for(Timeout::Infinite)
    }

    /// Like [`wait`](Event::wait), bounded by `timeout`.
    ///
    /// [`Timeout::IMMEDIATE`] polls: the state is inspected and the call returns without
    /// blocking. An already signaled event reports [`WaitResult::Succeeded`] even when an
    /// interrupt is pending for the caller; the pending interrupt stays latched for the next
    /// blocking call.
    pub fn wait_for(&self, timeout: Timeout) -> WaitResult {
        let current = Thread::current();
        let cancel = current.as_ref().map(|thread| thread.interrupt_handle());
        self.raw.wait(cancel, timeout)
    }

    /// Permanently retires the event.
    ///
    /// All current waiters are released with [`WaitResult::Abandoned`] and the call blocks
    /// until each of them has deregistered, so the event outlives every wait in progress.
    /// Closing an already closed event is a no-op.
    pub fn close(&self) {
        let woken = self.raw.close();
        if woken > 0 {
            debug!(name = %self.name, woken, "event closed while threads were waiting");
        }
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event").field("name", &self.name).finish()
    }
}
