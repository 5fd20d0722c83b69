use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers every failure condition the runtime reports through `Result`. Note that the
/// ordinary outcomes of blocking calls (timeout, interruption, abandonment) are *not* errors:
/// they are first-class values of [`crate::WaitResult`] that callers branch on. The variants
/// below exist for resource creation failures, for I/O in the supplemental modules, and for the
/// convenience conversion [`crate::WaitResult::into_result`] performs at the public boundary.
///
/// # Error Categories
///
/// ## Resource Creation
/// - [`Error::Spawn`] - The native execution context for a thread could not be created
///
/// ## Converted Wait Outcomes
/// - [`Error::Interrupted`] - A wait was woken by the calling thread's interrupt
/// - [`Error::TimedOut`] - A wait reached its deadline
/// - [`Error::Abandoned`] - The awaited resource was closed mid-wait
/// - [`Error::WaitFailed`] - The backing primitive reported a failure
///
/// ## I/O and Parsing
/// - [`Error::Io`] - Filesystem and socket errors from the `props`, `io` and `net` modules
///
/// # Examples
///
/// ```rust
/// use syncommon::{Error, Semaphore, Timeout};
///
/// let semaphore = Semaphore::new(0);
/// match semaphore.try_acquire(Timeout::IMMEDIATE).into_result() {
///     Ok(()) => println!("acquired a permit"),
///     Err(Error::TimedOut) => println!("no permit available"),
///     Err(Error::Interrupted) => println!("asked to shut down"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The native execution context for a thread could not be created.
    ///
    /// Returned by [`crate::Thread::start`] when the operating system refuses to spawn a new
    /// thread (resource exhaustion, process limits). The thread stays Stopped; the call is not
    /// retried automatically.
    #[error("Failed to spawn native thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A blocking call was woken by the calling thread's interrupt.
    ///
    /// Produced by [`crate::WaitResult::into_result`]. A thread observing this should treat it
    /// as a request to shut down and return from its unit of work promptly.
    #[error("The wait was interrupted")]
    Interrupted,

    /// A blocking call reached its deadline before the awaited condition was met.
    ///
    /// Produced by [`crate::WaitResult::into_result`].
    #[error("The wait timed out")]
    TimedOut,

    /// The awaited resource was closed while the blocking call was outstanding.
    ///
    /// Produced by [`crate::WaitResult::into_result`]. Only events report this outcome; see
    /// [`crate::Event::close`].
    #[error("The awaited resource was abandoned")]
    Abandoned,

    /// The backing wait primitive reported a failure.
    ///
    /// Produced by [`crate::WaitResult::into_result`]. The portable backend does not generate
    /// this outcome itself; it is part of the closed outcome vocabulary for backends that can.
    #[error("The native wait primitive failed")]
    WaitFailed,

    /// I/O error.
    ///
    /// Wraps standard I/O errors from property-file loading, wire-buffer bounds violations and
    /// socket operations.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
