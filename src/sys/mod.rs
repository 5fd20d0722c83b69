//! Native backend for threads and wait primitives.
//!
//! Everything the runtime needs from the operating system funnels through this module: spawning
//! a detached execution context, naming the current native identity, and the raw wait
//! primitives ([`RawEvent`], [`RawSemaphore`], [`RawMutex`]) that the public types in
//! [`crate::sync`] wrap. Exactly one backend is compiled into the crate and the rest of the
//! runtime never inspects which one it is.
//!
//! The backend shipped here is the portable one: it builds the multi-condition wait - "my own
//! readiness OR the caller's cancel signal" - out of a mutex-guarded state flag, per-waiter
//! condition variables and an explicit waiter registry, so it runs anywhere `std` threading
//! runs. A backend with a native handle-based multi-wait satisfies the same surface and could
//! be selected for a target in its place; both wait entry points take the optional cancel
//! handle and both honor the close-must-drain ordering.

mod portable;

pub(crate) use portable::{
    current_native_id, spawn, NativeId, RawEvent, RawMutex, RawMutexGuard, RawSemaphore,
};
