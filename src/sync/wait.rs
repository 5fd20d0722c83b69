//! Wait outcomes and deadlines shared by every blocking operation.
//!
//! Every suspension point in the runtime ([`crate::Semaphore::acquire`],
//! [`crate::Event::wait_for`], [`crate::Thread::join`], [`crate::Thread::sleep`]) reports its
//! result through the same closed [`WaitResult`] vocabulary and accepts the same [`Timeout`]
//! deadline type. Ordinary outcomes are values, never errors; see
//! [`WaitResult::into_result`] for the conversion offered at the public boundary.

use std::time::{Duration, Instant};

use strum::Display;

use crate::{Error, Result};

/// The outcome of a blocking operation.
///
/// Produced by every suspension point in the runtime. Timeout and interruption are expected,
/// recoverable results that callers branch on - they are deliberately not surfaced as errors so
/// that waits can be composed without unwinding through them.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Semaphore, Timeout, WaitResult};
///
/// let semaphore = Semaphore::new(1);
/// match semaphore.try_acquire(Timeout::from_millis(50)) {
///     WaitResult::Succeeded => println!("got a permit"),
///     WaitResult::TimedOut => println!("still busy"),
///     WaitResult::Interrupted => println!("shutting down"),
///     other => println!("unexpected outcome: {}", other),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum WaitResult {
    /// The awaited condition was met.
    Succeeded,
    /// The deadline elapsed before the condition was met.
    TimedOut,
    /// The calling thread's interrupt fired before the condition was met.
    Interrupted,
    /// The awaited resource was closed while the call was outstanding.
    Abandoned,
    /// The backing primitive reported a failure.
    Failed,
}

impl WaitResult {
    /// Returns `true` for [`WaitResult::Succeeded`].
    #[must_use]
    pub fn succeeded(self) -> bool {
        matches!(self, WaitResult::Succeeded)
    }

    /// Returns `true` for [`WaitResult::Interrupted`].
    #[must_use]
    pub fn interrupted(self) -> bool {
        matches!(self, WaitResult::Interrupted)
    }

    /// Converts the outcome into a `Result` for callers that prefer `?` over branching.
    ///
    /// This is the only place the runtime turns ordinary wait outcomes into errors; the
    /// primitives themselves always return the plain [`WaitResult`].
    ///
    /// # Errors
    ///
    /// [`Error::TimedOut`], [`Error::Interrupted`], [`Error::Abandoned`] or
    /// [`Error::WaitFailed`] for the corresponding non-success outcomes.
    pub fn into_result(self) -> Result<()> {
        match self {
            WaitResult::Succeeded => Ok(()),
            WaitResult::TimedOut => Err(Error::TimedOut),
            WaitResult::Interrupted => Err(Error::Interrupted),
            WaitResult::Abandoned => Err(Error::Abandoned),
            WaitResult::Failed => Err(Error::WaitFailed),
        }
    }
}

/// A deadline for blocking operations.
///
/// Timeouts are expressed in whole milliseconds. [`Timeout::Infinite`] blocks until the wait
/// resolves through its condition, interruption or abandonment; [`Timeout::IMMEDIATE`] (zero)
/// turns a blocking call into a non-blocking poll.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use syncommon::Timeout;
///
/// let t = Timeout::from_millis(250);
/// assert_eq!(t, Timeout::Finite(Duration::from_millis(250)));
/// assert!(!t.is_infinite());
/// assert!(Timeout::Infinite.is_infinite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Block until the wait resolves, however long that takes.
    Infinite,
    /// Block for at most this long.
    Finite(Duration),
}

impl Timeout {
    /// A zero deadline: the blocking call behaves as a non-blocking poll.
    pub const IMMEDIATE: Timeout = Timeout::Finite(Duration::ZERO);

    /// A deadline of `millis` whole milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Timeout::Finite(Duration::from_millis(millis))
    }

    /// Returns `true` for the distinguished infinite value.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self, Timeout::Infinite)
    }

    /// The absolute deadline measured from now, or `None` when the wait is unbounded.
    ///
    /// A finite duration too large to represent as an `Instant` is treated as unbounded.
    pub(crate) fn deadline(self) -> Option<Instant> {
        match self {
            Timeout::Infinite => None,
            Timeout::Finite(duration) => Instant::now().checked_add(duration),
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::Finite(duration)
    }
}
