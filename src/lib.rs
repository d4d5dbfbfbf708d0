//! slotring: a bounded lock-free SPSC/MPMC ring buffer for fixed-size
//! messages.
//!
//! Producers and consumers coordinate through a per-slot 32-bit sequence
//! number coupled to monotonically growing head/tail counters: a producer
//! claims a slot, writes its payload, and publishes; a consumer claims a
//! published slot, reads, and releases it for the next lap. The fast path
//! is atomic loads, an atomic store or CAS, an index mask, and a `memcpy`.
//! No mutex, no parking, no allocation.
//!
//! # Key Features
//!
//! - Compile-time mode selection: [`Spsc`] rings contain no CAS loop and
//!   are wait-free per operation; [`Mpmc`] rings are lock-free under any
//!   number of producers and consumers
//! - Zero-copy claim/publish API ([`PushSlot`]/[`PopSlot`] guards) with
//!   copy shims on top
//! - Pluggable allocation ([`RingAlloc`]): system heap or lock-free bump
//!   [`Arena`], consulted once at construction and once at teardown
//! - Padded head/tail counters (no producer/consumer false sharing)
//! - Non-blocking throughout: full/empty surface as
//!   [`RingError::WouldBlock`] and the caller picks a wait policy
//!   ([`Backoff`] helps)
//!
//! # Example
//!
//! ```
//! use slotring::{Backoff, Ring, RingConfig, Spsc};
//! use std::thread;
//!
//! let ring = Ring::<Spsc>::new(RingConfig::new(1024, 8))?;
//! let (tx, rx) = ring.split();
//! let backoff = Backoff::new();
//!
//! let producer = thread::spawn(move || {
//!     for i in 0u64..10_000 {
//!         backoff.wait(|| tx.push(&i.to_le_bytes())).unwrap();
//!     }
//! });
//!
//! let mut buf = [0u8; 8];
//! for expect in 0u64..10_000 {
//!     backoff.wait(|| rx.pop(&mut buf))?;
//!     assert_eq!(u64::from_le_bytes(buf), expect);
//! }
//! producer.join().unwrap();
//! # Ok::<(), slotring::RingError>(())
//! ```
//!
//! Counters are 32-bit and wrap; correctness holds while fewer than 2^31
//! operations are outstanding between peers, which bounded capacity
//! guarantees. Destroying a ring never synchronizes with in-flight
//! operations; quiescence is the caller's obligation.

mod alloc;
mod backoff;
mod config;
mod error;
mod handle;
mod invariants;
mod metrics;
mod mode;
mod ring;
mod slot;

pub use alloc::{Arena, RingAlloc, SystemAlloc};
pub use backoff::Backoff;
pub use config::{RingConfig, MAX_CAPACITY};
pub use error::RingError;
pub use handle::{Consumer, Producer};
pub use metrics::MetricsSnapshot;
pub use mode::{Mode, Mpmc, Spsc};
pub use ring::Ring;
pub use slot::{PopSlot, PushSlot};
