//! Runtime-managed threads.
//!
//! A [`Thread`] pairs one unit of work with a stable identity: a small synthetic
//! [`ThreadId`], a diagnostic name, a lifecycle [`ThreadState`], and the interrupt token
//! that makes every blocking call performed on the thread's behalf cancelable. Handles are
//! cheap to clone and share; cloning never duplicates the execution.
//!
//! Completion is observed through the thread's join event rather than the native join
//! primitive, which keeps [`Thread::join`] interruptible and repeatable like every other
//! wait in the crate. The thread that first touches the runtime is adopted as the `Main`
//! sentinel so that [`Thread::current`] resolves there too; threads created outside the
//! runtime have no identity and wait uninterruptibly.

use std::fmt;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strum::Display;
use tracing::{debug, warn};

use crate::sync::{Event, InterruptToken, Timeout, WaitResult};
use crate::sys;
use crate::Result;

mod registry;

use registry::Registry;

/// The name the first thread to touch the runtime is adopted under.
const MAIN_THREAD_NAME: &str = "Main";

type UnitOfWork = Box<dyn FnOnce() + Send + 'static>;

/// A small synthetic identifier for a runtime thread.
///
/// Ids are handed out monotonically starting at 1 and are never reused for the lifetime of
/// the process, unlike native thread ids which the operating system may recycle. Id 0
/// belongs to the `Main` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(u64);

impl ThreadId {
    pub(crate) const MAIN: ThreadId = ThreadId(0);

    pub(crate) fn new(id: u64) -> ThreadId {
        ThreadId(id)
    }

    /// The id as a plain integer.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lifecycle state of a runtime thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ThreadState {
    /// Not started yet, or finished running.
    Stopped,
    /// Currently executing its unit of work.
    Alive,
}

pub(crate) struct ThreadInner {
    id: ThreadId,
    name: String,
    alive: AtomicBool,
    started: AtomicBool,
    interrupt: InterruptToken,
    join_event: Event,
    work: Mutex<Option<UnitOfWork>>,
}

impl ThreadInner {
    fn sentinel() -> Arc<ThreadInner> {
        Arc::new(ThreadInner {
            id: ThreadId::MAIN,
            name: String::from(MAIN_THREAD_NAME),
            alive: AtomicBool::new(false),
            // The sentinel never has work to run; marking it started keeps `start` a no-op.
            started: AtomicBool::new(true),
            interrupt: InterruptToken::new(),
            join_event: Event::new(false, "Main-join"),
            work: Mutex::new(None),
        })
    }

    fn id(&self) -> ThreadId {
        self.id
    }
}

impl Drop for ThreadInner {
    fn drop(&mut self) {
        Registry::global().forget(self.id);
    }
}

/// A handle to one runtime-managed thread of execution.
///
/// Construction allocates the identity but does not run anything; [`start`](Thread::start)
/// launches the unit of work exactly once. Handles are reference counted: cloning shares
/// the same thread, equality compares identity, and dropping every handle merely forgets
/// the thread without stopping it.
///
/// Completion is signaled through a dedicated join event, so [`join`](Thread::join) can be
/// called from several threads at once, repeated after completion, bounded by a timeout,
/// and interrupted like any other blocking call in the crate.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Thread, WaitResult};
///
/// let worker = Thread::named("greeter", || println!("hello from the runtime"));
/// worker.start()?;
/// assert_eq!(worker.join(), WaitResult::Succeeded);
/// assert!(!worker.is_alive());
/// # Ok::<(), syncommon::Error>(())
/// ```
#[derive(Clone)]
pub struct Thread {
    inner: Arc<ThreadInner>,
}

impl Thread {
    /// Creates a thread around `work` with an auto-generated `Thread-{id}` name.
    pub fn new(work: impl FnOnce() + Send + 'static) -> Thread {
        Self::create(None, Box::new(work))
    }

    /// Creates a thread around `work` with an explicit name.
    pub fn named(name: impl Into<String>, work: impl FnOnce() + Send + 'static) -> Thread {
        Self::create(Some(name.into()), Box::new(work))
    }

    fn create(name: Option<String>, work: UnitOfWork) -> Thread {
        let registry = Registry::global();
        let id = registry.allocate_id();
        let name = name.unwrap_or_else(|| format!("Thread-{}", id.as_u64()));
        let join_event = Event::new(false, format!("{name}-join"));
        let inner = Arc::new(ThreadInner {
            id,
            name,
            alive: AtomicBool::new(false),
            started: AtomicBool::new(false),
            interrupt: InterruptToken::new(),
            join_event,
            work: Mutex::new(Some(work)),
        });
        registry.register(&inner);
        Thread { inner }
    }

    /// Launches the unit of work on a fresh native thread.
    ///
    /// Only the first call launches anything; later calls are no-ops that return `Ok`. The
    /// only failure is [`crate::Error::Spawn`] when the operating system refuses to create
    /// the thread, in which case a later retry is permitted.
    pub fn start(&self) -> Result<()> {
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let inner = Arc::clone(&self.inner);
        match sys::spawn(&self.inner.name, move || run(inner)) {
            Ok(()) => Ok(()),
            Err(error) => {
                self.inner.started.store(false, Ordering::Release);
                Err(error)
            }
        }
    }

    /// Requests interruption of whatever blocking call the thread is in, or will enter next.
    ///
    /// The request latches: with no wait in progress it stays pending and cuts short the
    /// thread's next blocking call. One request interrupts exactly one wait. Interrupting a
    /// thread that is busy computing does not stop the computation.
    pub fn interrupt(&self) {
        debug!(name = %self.inner.name, id = %self.inner.id, "interrupt requested");
        self.inner.interrupt.signal();
    }

    /// The current lifecycle state.
    ///
    /// `Alive` covers exactly the span of the unit of work; a thread observed `Stopped`
    /// after [`start`](Thread::start) has either not been scheduled yet or already
    /// finished, and [`join`](Thread::join) distinguishes the two.
    pub fn state(&self) -> ThreadState {
        if self.inner.alive.load(Ordering::Acquire) {
            ThreadState::Alive
        } else {
            ThreadState::Stopped
        }
    }

    /// Whether the thread is currently executing its unit of work.
    pub fn is_alive(&self) -> bool {
        self.state() == ThreadState::Alive
    }

    /// The thread's diagnostic name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The thread's synthetic id.
    pub fn id(&self) -> ThreadId {
        self.inner.id
    }

    /// Blocks until the thread has finished running.
    ///
    /// Completion is observed through the thread's join event, never the native join, so
    /// joining is repeatable, shareable and interruptible. Joining a thread that was never
    /// started blocks until interrupted.
    pub fn join(&self) -> WaitResult {
        self.join_for(Timeout::Infinite)
    }

    /// Like [`join`](Thread::join), bounded by `timeout`.
    pub fn join_for(&self, timeout: Timeout) -> WaitResult {
        self.inner.join_event.wait_for(timeout)
    }

    /// The handle of the calling thread, if the runtime knows it.
    ///
    /// Inside a unit of work this resolves to the thread running it. The thread that first
    /// touched the runtime resolves to the `Main` sentinel (id 0, state `Stopped`, no unit
    /// of work). Threads created outside the runtime get `None`; their blocking calls are
    /// not interruptible.
    pub fn current() -> Option<Thread> {
        Registry::global()
            .resolve(sys::current_native_id())
            .map(|inner| Thread { inner })
    }

    /// Blocks the calling thread for the given duration.
    ///
    /// For runtime threads the sleep is a wait on their own interrupt token:
    /// [`WaitResult::Succeeded`] after the full duration, [`WaitResult::Interrupted`] when
    /// the token fires first. Foreign threads sleep uninterruptibly and always report
    /// success; with [`Timeout::Infinite`] a foreign thread never returns.
    pub fn sleep(timeout: Timeout) -> WaitResult {
        match Thread::current() {
            Some(thread) => thread.inner.interrupt.sleep(timeout),
            None => {
                match timeout {
                    Timeout::Finite(duration) => std::thread::sleep(duration),
                    Timeout::Infinite => loop {
                        std::thread::sleep(Duration::from_secs(3_600));
                    },
                }
                WaitResult::Succeeded
            }
        }
    }

    /// Snapshots every thread the runtime currently knows, the `Main` sentinel included.
    ///
    /// A thread stays enumerable while any handle to it is live, even after it stopped;
    /// once the last handle is dropped it disappears from the snapshot.
    pub fn enumerate() -> Vec<Thread> {
        Registry::global()
            .threads()
            .into_iter()
            .map(|inner| Thread { inner })
            .collect()
    }

    /// The raw signal resources register as the cancel side of a dual wait.
    pub(crate) fn interrupt_handle(&self) -> &crate::sys::RawEvent {
        self.inner.interrupt.cancel_handle()
    }
}

impl PartialEq for Thread {
    fn eq(&self, other: &Thread) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Thread {}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

/// Trampoline running on the freshly spawned native thread.
fn run(inner: Arc<ThreadInner>) {
    let registry = Registry::global();
    let native = sys::current_native_id();
    registry.attach_native(native, &inner);
    inner.alive.store(true, Ordering::Release);
    debug!(name = %inner.name, id = %inner.id, "thread started");

    let work = inner.work.lock().unwrap().take();
    if let Some(work) = work {
        if panic::catch_unwind(panic::AssertUnwindSafe(work)).is_err() {
            warn!(name = %inner.name, id = %inner.id, "unit of work panicked");
        }
    }

    inner.alive.store(false, Ordering::Release);
    registry.detach_native(native);
    debug!(name = %inner.name, id = %inner.id, "thread stopped");
    // Signaled last, so a joiner released here finds the thread stopped and deregistered.
    inner.join_event.signal();
}
