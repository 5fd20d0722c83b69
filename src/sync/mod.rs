//! Blocking synchronization primitives with uniform wait outcomes.
//!
//! Every blocking operation in this module resolves to a [`WaitResult`] instead of a panic
//! or an error type: the wait either succeeded, ran out of time, was interrupted on behalf
//! of the calling thread, or lost its resource to [`Event::close`]. Callers that prefer
//! `Result` plumbing convert with [`WaitResult::into_result`].
//!
//! Three primitives cover the usual shapes of coordination:
//!
//! - [`Event`] latches a condition and releases every waiter at once
//! - [`Semaphore`] counts permits and releases one waiter per permit
//! - [`Lock`] grants exclusive, reentrant ownership of a critical section
//!
//! Waits performed by runtime [`crate::Thread`]s additionally respond to
//! [`crate::Thread::interrupt`]; see the crate-level documentation for the interruption
//! contract.

mod event;
mod interrupt;
mod lock;
mod semaphore;
mod wait;

pub use event::Event;
pub use lock::{Lock, LockGuard};
pub use semaphore::Semaphore;
pub use wait::{Timeout, WaitResult};

pub(crate) use interrupt::InterruptToken;
