//! # syncommon Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! syncommon library. Import this module to get quick access to the essential types for
//! threading and synchronization.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all syncommon operations
pub use crate::Error;

/// The result type used throughout syncommon
pub use crate::Result;

// ================================================================================================
// Threads and Identity
// ================================================================================================

/// Runtime-managed threads and their identity
pub use crate::thread::{Thread, ThreadId, ThreadState};

// ================================================================================================
// Synchronization Primitives
// ================================================================================================

/// The outcome vocabulary and deadline type every blocking call shares
pub use crate::sync::{Timeout, WaitResult};

/// Manual-reset events, counting semaphores and reentrant locks
pub use crate::sync::{Event, Lock, LockGuard, Semaphore};

// ================================================================================================
// Configuration and Wire Encoding
// ================================================================================================

/// Line-oriented property tables
pub use crate::props::Properties;

/// Endian-aware buffers for wire encoding
pub use crate::io::{Endian, InputBuffer, OutputBuffer};

// ================================================================================================
// Networking
// ================================================================================================

/// Multicast datagram sockets and packets
pub use crate::net::{DatagramPacket, MulticastSocket};
