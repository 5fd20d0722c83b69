//! Reentrant mutual exclusion.

use std::fmt;

use crate::sys::{RawMutex, RawMutexGuard};

/// A reentrant mutual-exclusion lock.
///
/// The thread holding the lock may call [`lock`](Lock::lock) again without deadlocking; the
/// lock is released once every guard handed to that thread has been dropped. Acquisition is
/// not interruptible and does not time out: a critical section is meant to be short, and a
/// thread inside one is expected to come out on its own.
///
/// # Examples
///
/// ```rust
/// use syncommon::Lock;
///
/// let lock = Lock::new();
/// let outer = lock.lock();
/// let inner = lock.lock();
/// drop(inner);
/// drop(outer);
/// ```
pub struct Lock {
    raw: RawMutex,
}

impl Lock {
    /// Creates an unlocked lock.
    pub fn new() -> Lock {
        Lock {
            raw: RawMutex::new(()),
        }
    }

    /// Blocks until the calling thread holds the lock and returns the guard keeping it held.
    pub fn lock(&self) -> LockGuard<'_> {
        LockGuard {
            _guard: self.raw.lock(),
        }
    }
}

impl Default for Lock {
    fn default() -> Self {
        Lock::new()
    }
}

impl fmt::Debug for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock").finish_non_exhaustive()
    }
}

/// Holds a [`Lock`] until dropped.
pub struct LockGuard<'a> {
    _guard: RawMutexGuard<'a>,
}
