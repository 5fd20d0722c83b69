//! Counting semaphores.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::sync::{Timeout, WaitResult};
use crate::sys::RawSemaphore;
use crate::thread::Thread;

static ANONYMOUS_SEMAPHORES: AtomicU64 = AtomicU64::new(0);

/// A counting semaphore guarding a fixed pool of permits.
///
/// The semaphore starts with `permits` available and that count is also its ceiling:
/// [`release`](Semaphore::release) beyond the initial count is refused. Acquisition blocks
/// while no permit is available and is interruptible for runtime [`Thread`]s; an interrupted
/// or timed-out acquire leaves the permit count exactly as it found it.
///
/// Permits are not owned. Any thread may release, not just the one that acquired, which
/// makes the semaphore usable for signaling between producer and consumer roles as well as
/// for plain resource counting.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Semaphore, Timeout, WaitResult};
///
/// let pool = Semaphore::new(2);
/// assert_eq!(pool.acquire(), WaitResult::Succeeded);
/// assert_eq!(pool.acquire(), WaitResult::Succeeded);
/// assert_eq!(pool.try_acquire(Timeout::IMMEDIATE), WaitResult::TimedOut);
///
/// assert!(pool.release());
/// assert_eq!(pool.available_permits(), 1);
/// ```
pub struct Semaphore {
    raw: RawSemaphore,
    name: String,
}

impl Semaphore {
    /// Creates a semaphore with `permits` permits and an auto-generated name.
    pub fn new(permits: u32) -> Semaphore {
        let serial = ANONYMOUS_SEMAPHORES.fetch_add(1, Ordering::Relaxed);
        Self::named(format!("Semaphore-{serial}"), permits)
    }

    /// Creates a semaphore with `permits` permits and the given diagnostic name.
    pub fn named(name: impl Into<String>, permits: u32) -> Semaphore {
        Semaphore {
            raw: RawSemaphore::new(permits),
            name: name.into(),
        }
    }

    /// The diagnostic name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks until a permit is acquired or the calling thread is interrupted.
    pub fn acquire(&self) -> WaitResult {
        self.try_acquire(Timeout::Infinite)
    }

    /// Like [`acquire`](Semaphore::acquire), bounded by `timeout`.
    ///
    /// [`Timeout::IMMEDIATE`] polls: a free permit is taken if one is available and the call
    /// returns without blocking. A free permit outranks a pending interrupt, which stays
    /// latched for the caller's next blocking call.
    pub fn try_acquire(&self, timeout: Timeout) -> WaitResult {
        let current = Thread::current();
        let cancel = current.as_ref().map(|thread| thread.interrupt_handle());
        self.raw.wait(cancel, timeout)
    }

    /// Returns one permit to the pool, waking a blocked acquirer if there is one.
    ///
    /// Returns `false` and leaves the count unchanged when the pool is already at its
    /// configured capacity. The refusal is logged; what a release past the maximum does is
    /// otherwise unspecified across backends.
    pub fn release(&self) -> bool {
        let released = self.raw.release();
        if !released {
            warn!(name = %self.name, "release refused, semaphore already at capacity");
        }
        released
    }

    /// The number of permits currently available.
    ///
    /// A snapshot only; other threads may acquire or release between this call and the next.
    pub fn available_permits(&self) -> u32 {
        self.raw.available()
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semaphore")
            .field("name", &self.name)
            .field("available", &self.raw.available())
            .finish()
    }
}
