//! Portable implementation of the backend contract.
//!
//! Built entirely from `std` threading primitives. A manual-reset event is a mutex-guarded
//! state flag plus a registry of waiters, each waiter owning its own condition variable; a
//! cancelable wait registers one [`WaitNode`] with both the awaited resource and the cancel
//! signal at once, and whichever source fires first wakes the node with its reason. Closing an
//! event wakes every registered waiter and then blocks until the registry has drained, so a
//! closer never returns while a waiter is still mid-wake.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Instant;

use crate::sync::{Timeout, WaitResult};
use crate::{Error, Result};

/// Recursive mutual exclusion supplied to [`crate::Lock`].
pub(crate) type RawMutex = parking_lot::ReentrantMutex<()>;
/// Guard for [`RawMutex`].
pub(crate) type RawMutexGuard<'a> = parking_lot::ReentrantMutexGuard<'a, ()>;

/// Identity of a native execution context.
pub(crate) type NativeId = std::thread::ThreadId;

/// The native identity of the calling execution context.
pub(crate) fn current_native_id() -> NativeId {
    std::thread::current().id()
}

/// Spawns a detached native thread running `entry`.
///
/// The native join handle is dropped on purpose: thread completion is observed through the
/// owning Thread's join event, never through a native join, so there is nothing to release
/// when the entry function returns.
///
/// # Errors
///
/// [`Error::Spawn`] when the operating system refuses to create the thread.
pub(crate) fn spawn<F>(name: &str, entry: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .name(name.to_owned())
        .spawn(entry)
        .map(|_| ())
        .map_err(Error::Spawn)
}

/// Why a parked waiter was woken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    /// The awaited resource fired.
    Signaled,
    /// The cancel signal fired.
    Canceled,
    /// The awaited resource was closed.
    Abandoned,
}

/// One blocked call's wake-up slot.
///
/// A node is registered with up to two wake sources at once (the awaited resource and the
/// caller's cancel signal). The first source to fire records its reason and wakes the
/// condition variable; later wakes are ignored. The reason is final once the node has been
/// deregistered from every source.
struct WaitNode {
    slot: Mutex<Option<Wake>>,
    cond: Condvar,
}

impl WaitNode {
    fn new() -> Arc<Self> {
        Arc::new(WaitNode {
            slot: Mutex::new(None),
            cond: Condvar::new(),
        })
    }

    /// Records `wake` and wakes the parked thread unless another source fired first.
    fn wake(&self, wake: Wake) {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_none() {
            *slot = Some(wake);
            self.cond.notify_one();
        }
    }

    /// Parks the calling thread until a source fires or the deadline passes.
    ///
    /// Spurious condition-variable wakes re-check the slot and park again.
    fn park(&self, deadline: Option<Instant>) {
        let mut slot = self.slot.lock().unwrap();
        loop {
            if slot.is_some() {
                return;
            }
            match deadline {
                None => slot = self.cond.wait(slot).unwrap(),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return;
                    }
                    let (guard, _) = self.cond.wait_timeout(slot, deadline - now).unwrap();
                    slot = guard;
                }
            }
        }
    }

    /// The recorded wake reason, `None` if no source fired.
    fn reason(&self) -> Option<Wake> {
        *self.slot.lock().unwrap()
    }
}

/// A registration in an event's waiter registry: the node to wake and the reason to deliver.
///
/// The same registry serves two roles. A thread waiting *on* the event registers with
/// [`Wake::Signaled`]; a thread waiting on something else that races this event as its cancel
/// signal registers with [`Wake::Canceled`]. `signal` wakes each entry with its own reason.
struct Waiter {
    node: Arc<WaitNode>,
    wake: Wake,
}

struct EventCore {
    signaled: bool,
    closed: bool,
    waiters: VecDeque<Waiter>,
}

/// Backend state for a manual-reset event.
///
/// Also backs the per-thread interrupt token, which layers auto-reset consumption on top via
/// [`RawEvent::consume`]. The signaled flag and the waiter registry are only ever touched under
/// the internal mutex; `close` additionally waits on `drained` until the registry is empty.
pub(crate) struct RawEvent {
    state: Mutex<EventCore>,
    /// Notified whenever the waiter registry becomes empty; `close` blocks on it.
    drained: Condvar,
}

impl RawEvent {
    pub(crate) fn new(signaled: bool) -> Self {
        RawEvent {
            state: Mutex::new(EventCore {
                signaled,
                closed: false,
                waiters: VecDeque::new(),
            }),
            drained: Condvar::new(),
        }
    }

    /// Sets the state and wakes every registered waiter once. The state stays set until
    /// [`RawEvent::clear`] (manual-reset semantics).
    pub(crate) fn signal(&self) {
        let state = &mut *self.state.lock().unwrap();
        if state.closed {
            return;
        }
        state.signaled = true;
        for waiter in &state.waiters {
            waiter.node.wake(waiter.wake);
        }
    }

    /// Resets the state. Waiters already woken by a previous signal are unaffected.
    pub(crate) fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.closed {
            state.signaled = false;
        }
    }

    /// Takes a pending signal, resetting the state. Returns whether one was pending.
    pub(crate) fn consume(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.signaled && !state.closed {
            state.signaled = false;
            true
        } else {
            false
        }
    }

    /// Wakes every registered waiter as abandoned and blocks until all of them have
    /// deregistered. Returns how many waiters were woken.
    ///
    /// The drain wait is the ordering that keeps a closer from finishing while a waiter is
    /// still inspecting the event; callers may release their storage as soon as this returns.
    /// Idempotent, and a second concurrent closer also waits for the drain.
    pub(crate) fn close(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        let woken = if state.closed {
            0
        } else {
            state.closed = true;
            for waiter in &state.waiters {
                waiter.node.wake(Wake::Abandoned);
            }
            state.waiters.len()
        };
        while !state.waiters.is_empty() {
            state = self.drained.wait(state).unwrap();
        }
        woken
    }

    /// Registers `node` to be woken as canceled when this event fires.
    ///
    /// Returns `false` if the signal is already pending; the pending signal is consumed and the
    /// caller reports the interruption itself instead of blocking.
    fn register_cancel(&self, node: &Arc<WaitNode>) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            // No cancel source to race; the caller proceeds uninterruptible.
            return true;
        }
        if state.signaled {
            state.signaled = false;
            return false;
        }
        state.waiters.push_back(Waiter {
            node: Arc::clone(node),
            wake: Wake::Canceled,
        });
        true
    }

    /// Removes `node` from the registry, notifying a pending closer when it empties.
    /// Returns whether the node was still registered.
    fn deregister(&self, node: &Arc<WaitNode>) -> bool {
        let mut state = self.state.lock().unwrap();
        let found = state
            .waiters
            .iter()
            .position(|waiter| Arc::ptr_eq(&waiter.node, node));
        if let Some(index) = found {
            state.waiters.remove(index);
        }
        if state.waiters.is_empty() {
            self.drained.notify_all();
        }
        found.is_some()
    }

    /// Waits for this event to fire, racing the optional cancel signal.
    ///
    /// Before blocking: an already-set event wins over a pending cancel, which in turn wins
    /// over a zero deadline. After a wake the cancel signal is attributed first (and consumed),
    /// then the recorded wake reason, then the deadline. The event state itself is never
    /// consumed; manual-reset events stay signaled until cleared.
    pub(crate) fn wait(&self, cancel: Option<&RawEvent>, timeout: Timeout) -> WaitResult {
        let deadline = timeout.deadline();

        {
            let state = self.state.lock().unwrap();
            if state.signaled {
                return WaitResult::Succeeded;
            }
            if state.closed {
                return WaitResult::Abandoned;
            }
        }
        if let Some(cancel) = cancel {
            if cancel.consume() {
                return WaitResult::Interrupted;
            }
        }
        if deadline_elapsed(deadline) {
            return WaitResult::TimedOut;
        }

        let node = WaitNode::new();
        {
            let mut state = self.state.lock().unwrap();
            // State may have flipped while unlocked; registering after the re-check keeps the
            // immediate-success rule intact.
            if state.signaled {
                return WaitResult::Succeeded;
            }
            if state.closed {
                return WaitResult::Abandoned;
            }
            state.waiters.push_back(Waiter {
                node: Arc::clone(&node),
                wake: Wake::Signaled,
            });
        }
        if let Some(cancel) = cancel {
            if !cancel.register_cancel(&node) {
                self.deregister(&node);
                return WaitResult::Interrupted;
            }
        }

        node.park(deadline);

        if let Some(cancel) = cancel {
            cancel.deregister(&node);
        }
        self.deregister(&node);
        // The node is out of every registry; the reason cannot change any more.
        let reason = node.reason();

        if let Some(cancel) = cancel {
            if cancel.consume() {
                return WaitResult::Interrupted;
            }
        }
        match reason {
            Some(Wake::Signaled) => WaitResult::Succeeded,
            Some(Wake::Canceled) => WaitResult::Interrupted,
            Some(Wake::Abandoned) => WaitResult::Abandoned,
            None => WaitResult::TimedOut,
        }
    }
}

struct SemCore {
    permits: u32,
    max: u32,
    waiters: VecDeque<Arc<WaitNode>>,
}

/// Backend state for a counting semaphore.
///
/// Permits and the waiter registry live under one mutex. `release` increments and hands a wake
/// to the longest-registered waiter; the woken waiter races every other acquirer for the permit
/// and re-registers if it loses, so no wake and no permit is ever stranded.
pub(crate) struct RawSemaphore {
    inner: Mutex<SemCore>,
}

impl RawSemaphore {
    pub(crate) fn new(permits: u32) -> Self {
        RawSemaphore {
            inner: Mutex::new(SemCore {
                permits,
                max: permits,
                waiters: VecDeque::new(),
            }),
        }
    }

    /// Snapshot of the free permit count.
    pub(crate) fn available(&self) -> u32 {
        self.inner.lock().unwrap().permits
    }

    /// Returns one permit and wakes one registered waiter.
    ///
    /// Returns `false` without changing the counter when the release would exceed the
    /// initially configured maximum.
    pub(crate) fn release(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.permits >= inner.max {
            return false;
        }
        inner.permits += 1;
        if let Some(node) = inner.waiters.pop_front() {
            node.wake(Wake::Signaled);
        }
        true
    }

    fn try_take(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.permits > 0 {
            inner.permits -= 1;
            true
        } else {
            false
        }
    }

    /// Hands a wake to the next waiter when a delivered wake could not be used by its target
    /// (the target was interrupted between being chosen by `release` and taking the permit).
    fn pass_wake(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.permits > 0 {
            if let Some(node) = inner.waiters.pop_front() {
                node.wake(Wake::Signaled);
            }
        }
    }

    fn deregister(&self, node: &Arc<WaitNode>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let found = inner
            .waiters
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, node));
        if let Some(index) = found {
            inner.waiters.remove(index);
        }
        found.is_some()
    }

    /// Takes one permit, blocking until one is produced, the deadline passes or the cancel
    /// signal fires.
    ///
    /// The permit check always runs before the cancel check, so an available permit wins a
    /// simultaneous interrupt at wait entry; once blocked, the interrupt wins ties. A waiter
    /// woken by `release` that loses the permit to a faster acquirer resumes waiting with the
    /// remaining deadline.
    pub(crate) fn wait(&self, cancel: Option<&RawEvent>, timeout: Timeout) -> WaitResult {
        let deadline = timeout.deadline();

        loop {
            if self.try_take() {
                return WaitResult::Succeeded;
            }
            if let Some(cancel) = cancel {
                if cancel.consume() {
                    return WaitResult::Interrupted;
                }
            }
            if deadline_elapsed(deadline) {
                return WaitResult::TimedOut;
            }

            let node = WaitNode::new();
            {
                let mut inner = self.inner.lock().unwrap();
                if inner.permits > 0 {
                    inner.permits -= 1;
                    return WaitResult::Succeeded;
                }
                inner.waiters.push_back(Arc::clone(&node));
            }
            if let Some(cancel) = cancel {
                if !cancel.register_cancel(&node) {
                    if !self.deregister(&node) {
                        // A release chose this node before we backed out; pass its wake on.
                        self.pass_wake();
                    }
                    return WaitResult::Interrupted;
                }
            }

            node.park(deadline);

            if let Some(cancel) = cancel {
                cancel.deregister(&node);
            }
            let was_registered = self.deregister(&node);
            let reason = node.reason();

            if let Some(cancel) = cancel {
                if cancel.consume() {
                    if !was_registered {
                        self.pass_wake();
                    }
                    return WaitResult::Interrupted;
                }
            }
            match reason {
                Some(Wake::Canceled) => return WaitResult::Interrupted,
                Some(Wake::Abandoned) => return WaitResult::Abandoned,
                // Woken to contend for the permit again, or the deadline passed; the loop
                // head settles which.
                Some(Wake::Signaled) | None => {}
            }
        }
    }
}

fn deadline_elapsed(deadline: Option<Instant>) -> bool {
    matches!(deadline, Some(deadline) if Instant::now() >= deadline)
}
