// Copyright 2025 The syncommon developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(dead_code)]

//! # syncommon
//!
//! [![Crates.io](https://img.shields.io/crates/v/syncommon.svg)](https://crates.io/crates/syncommon)
//! [![Documentation](https://docs.rs/syncommon/badge.svg)](https://docs.rs/syncommon)
//!
//! A portable concurrency runtime built on plain OS threads. `syncommon` gives every thread
//! a stable identity and makes every blocking call it performs interruptible from the
//! outside, with one closed vocabulary of outcomes instead of a mix of booleans, panics and
//! error types.
//!
//! ## Features
//!
//! - **🧵 Managed threads** - Named, enumerable threads with small stable ids and a
//!   repeatable, shareable join
//! - **⏹️ Uniform interruption** - One latched interrupt request per thread cuts short its
//!   current or next blocking call, whichever comes first
//! - **🔔 Manual-reset events** - Latch a condition, release every waiter at once, retire
//!   the event with a drain guarantee
//! - **🎫 Counting semaphores** - Fixed permit pools with polling, timed and infinite
//!   acquisition
//! - **🔁 Reentrant locks** - Guard-based critical sections the owning thread may re-enter
//! - **📨 Datagram plumbing** - IPv4 multicast sockets, packet buffers and endian-aware
//!   wire encoding for the processes coordinated by this runtime
//!
//! ## Quick Start
//!
//! Add `syncommon` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! syncommon = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use syncommon::prelude::*;
//! use std::sync::Arc;
//!
//! let ready = Arc::new(Event::new(false, "ready"));
//! let signaler = {
//!     let ready = Arc::clone(&ready);
//!     Thread::named("signaler", move || {
//!         ready.signal();
//!     })
//! };
//! signaler.start()?;
//! assert_eq!(ready.wait(), WaitResult::Succeeded);
//! assert_eq!(signaler.join(), WaitResult::Succeeded);
//! # Ok::<(), syncommon::Error>(())
//! ```
//!
//! ### Interrupting a Blocked Thread
//!
//! ```rust
//! use syncommon::{Thread, Timeout, WaitResult};
//!
//! let sleeper = Thread::named("sleeper", || {
//!     let outcome = Thread::sleep(Timeout::Infinite);
//!     assert_eq!(outcome, WaitResult::Interrupted);
//! });
//! sleeper.start()?;
//! sleeper.interrupt();
//! assert_eq!(sleeper.join(), WaitResult::Succeeded);
//! # Ok::<(), syncommon::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `syncommon` is organized into a handful of modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`thread`] - Managed threads, identity and the interruption contract
//! - [`sync`] - Events, semaphores, locks and the [`WaitResult`] vocabulary
//! - [`io`] - Endian-aware buffers for wire encoding
//! - [`net`] - Multicast datagram sockets and packets
//! - [`props`] - Line-oriented property tables for configuration
//! - [`Error`] and [`Result`] - Error handling for the operations that can fail
//!
//! ### The Interruption Contract
//!
//! Every blocking call made by a runtime [`Thread`] resolves to a [`WaitResult`]:
//!
//! - `Succeeded` - the thing waited for happened
//! - `TimedOut` - the deadline passed first
//! - `Interrupted` - [`Thread::interrupt`] was aimed at the waiting thread
//! - `Abandoned` - the resource was retired mid-wait by [`Event::close`]
//! - `Failed` - the wait could not be carried out at all
//!
//! An interrupt request latches until a blocking call observes it, so interrupting a thread
//! that is busy computing cuts short its *next* wait rather than being lost. One request
//! interrupts exactly one wait. A wait whose resource is already available at entry reports
//! `Succeeded` even when an interrupt is pending; the request stays latched for the next
//! blocking call. Threads not created through this runtime may use every primitive, but
//! their waits are not interruptible because there is no identity to aim the request at.
//!
//! ## Error Handling
//!
//! Blocking operations report their outcome in the [`WaitResult`] they return. The places
//! where something can actually fail, such as spawning a native thread or touching the
//! network, return [`Result<T, Error>`](Result), and a [`WaitResult`] converts into one
//! when callers prefer `?` plumbing:
//!
//! ```rust
//! use syncommon::{Error, Semaphore, Timeout};
//!
//! let pool = Semaphore::named("pool", 0);
//! match pool.try_acquire(Timeout::from_millis(10)).into_result() {
//!     Ok(()) => println!("permit acquired"),
//!     Err(Error::TimedOut) => println!("pool exhausted"),
//!     Err(Error::Interrupted) => println!("caller was interrupted"),
//!     Err(error) => println!("wait failed: {error}"),
//! }
//! ```

pub(crate) mod error;
pub(crate) mod sys;


/// Convenient re-exports of the most commonly used types.
///
/// This module provides a curated selection of the most frequently used types from across
/// the library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use syncommon::prelude::*;
///
/// let gate = Semaphore::named("gate", 1);
/// assert_eq!(gate.acquire(), WaitResult::Succeeded);
/// assert!(gate.release());
/// ```
pub mod prelude;

/// Endian-aware binary buffers for wire encoding.
///
/// [`io::InputBuffer`] decodes a borrowed byte slice and [`io::OutputBuffer`] builds an
/// owned one. Both fix their [`io::Endian`] order at construction, and strings travel as a
/// `u16` byte length followed by UTF-8 bytes.
pub mod io;

/// Packet-oriented networking with IPv4 multicast support.
///
/// [`net::MulticastSocket`] manages group membership on top of a UDP socket and offers a
/// timed receive; [`net::DatagramPacket`] is the payload-plus-address unit shared by both
/// directions.
pub mod net;

/// Line-oriented property tables.
///
/// [`props::Properties`] parses the familiar `name=value` format with `#` and `!` comments
/// and stores the result as a plain string-to-string table.
pub mod props;

/// Blocking synchronization primitives with uniform wait outcomes.
///
/// The three primitives cover the usual shapes of coordination:
///
/// - [`Event`] latches a condition and releases every waiter at once
/// - [`Semaphore`] counts permits and releases one waiter per permit
/// - [`Lock`] grants exclusive, reentrant ownership of a critical section
///
/// Every blocking call resolves to a [`WaitResult`]; waits performed by runtime
/// [`Thread`]s additionally respond to [`Thread::interrupt`].
pub mod sync;

/// Runtime-managed threads.
///
/// A [`Thread`] pairs one unit of work with a stable identity: a synthetic [`ThreadId`], a
/// diagnostic name, a lifecycle [`ThreadState`] and the interrupt token that makes its
/// blocking calls cancelable. Completion is observed through the thread's join event, so
/// joining is repeatable, shareable, timed and interruptible like every other wait.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Thread, WaitResult};
///
/// let worker = Thread::new(|| {
///     let me = Thread::current().expect("runtime threads know themselves");
///     println!("running as {} (id {})", me.name(), me.id());
/// });
/// worker.start()?;
/// assert_eq!(worker.join(), WaitResult::Succeeded);
/// # Ok::<(), syncommon::Error>(())
/// ```
pub mod thread;

/// `syncommon` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Result, Thread};
///
/// fn launch(worker: &Thread) -> Result<()> {
///     worker.start()
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `syncommon` Error type
///
/// The main error type for all operations in this crate. Wait outcomes convert into it
/// through [`WaitResult::into_result`]; spawning and networking produce it directly.
///
/// # Examples
///
/// ```rust
/// use syncommon::{Error, Event, Timeout};
///
/// let gate = Event::new(false, "gate");
/// match gate.wait_for(Timeout::IMMEDIATE).into_result() {
///     Ok(()) => println!("gate was open"),
///     Err(Error::TimedOut) => println!("gate still closed"),
///     Err(error) => println!("wait failed: {error}"),
/// }
/// ```
pub use error::Error;

/// The synchronization primitives and the wait vocabulary they share.
///
/// See [`sync`] for the module-level discussion of how [`Event`], [`Semaphore`] and
/// [`Lock`] relate, and [`WaitResult`] for the outcome contract every blocking call
/// follows.
pub use sync::{Event, Lock, LockGuard, Semaphore, Timeout, WaitResult};

/// Managed threads and their identity types.
///
/// See [`thread`] for the lifecycle and interruption contract.
pub use thread::{Thread, ThreadId, ThreadState};
