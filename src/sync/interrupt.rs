//! Per-thread interrupt tokens.
//!
//! A token is the cancel side of every dual wait performed on behalf of its owning thread.
//! Tokens are deliberately not public: a resource that wants to honor interruption resolves
//! the *calling* thread through [`crate::Thread::current`] and borrows its token for the
//! duration of one blocking call. Nothing else ever sees another thread's cancellation handle.

use crate::sync::{Timeout, WaitResult};
use crate::sys::RawEvent;

/// The auto-resetting cancellation signal owned by one [`crate::Thread`].
///
/// Exactly one token exists per thread for its whole lifetime. Signaling it wakes a wait
/// currently in progress on behalf of the owner; with no wait in progress the signal stays
/// pending and interrupts the owner's next blocking call. Whichever wait observes the signal
/// consumes it, returning the token to its quiescent state.
pub(crate) struct InterruptToken {
    raw: RawEvent,
}

impl InterruptToken {
    pub(crate) fn new() -> Self {
        InterruptToken {
            raw: RawEvent::new(false),
        }
    }

    /// Fires the token.
    pub(crate) fn signal(&self) {
        self.raw.signal();
    }

    /// The raw signal a resource registers as the cancel side of its dual wait.
    pub(crate) fn cancel_handle(&self) -> &RawEvent {
        &self.raw
    }

    /// Blocks on the token alone; this is the owner's sleep.
    ///
    /// Returns [`WaitResult::Succeeded`] after the full duration elapsed and
    /// [`WaitResult::Interrupted`] when the token fired first, consuming the signal.
    pub(crate) fn sleep(&self, timeout: Timeout) -> WaitResult {
        match self.raw.wait(None, timeout) {
            WaitResult::Succeeded => {
                self.raw.consume();
                WaitResult::Interrupted
            }
            WaitResult::TimedOut => WaitResult::Succeeded,
            other => other,
        }
    }
}
