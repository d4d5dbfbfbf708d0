//! Compile-time selection between the SPSC and MPMC claim paths.
//!
//! The mode is a type parameter of [`Ring`], so an SPSC ring compiles with
//! no CAS loop at all and the two disciplines cannot be mixed on one ring.
//! Publish, release, and the copy shims are mode-independent; only claiming
//! differs.
//!
//! [`Ring`]: crate::Ring

use crate::ring::{Ring, Side};
use crate::{RingAlloc, RingError};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Spsc {}
    impl Sealed for super::Mpmc {}
}

/// Claim-path selector. Sealed: the only modes are [`Spsc`] and [`Mpmc`].
pub trait Mode: sealed::Sealed + Sized + 'static {
    #[doc(hidden)]
    fn push_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError>;

    #[doc(hidden)]
    fn pop_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError>;
}

/// Single producer, single consumer. Each side is a plain load/check/store;
/// every push and pop completes in bounded steps. The one-thread-per-side
/// contract is enforced by [`Ring::split`] handing out non-clonable,
/// non-`Sync` handles.
///
/// [`Ring::split`]: crate::Ring::split
#[derive(Debug)]
pub enum Spsc {}

/// Any number of concurrent producers and consumers. Claims go through a
/// compare-and-swap loop on the shared counter; the ring is lock-free
/// system-wide.
#[derive(Debug)]
pub enum Mpmc {}

impl Mode for Spsc {
    #[inline]
    fn push_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError> {
        ring.claim_spsc(Side::Producer)
    }

    #[inline]
    fn pop_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError> {
        ring.claim_spsc(Side::Consumer)
    }
}

impl Mode for Mpmc {
    #[inline]
    fn push_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError> {
        ring.claim_mpmc(Side::Producer)
    }

    #[inline]
    fn pop_claim<A: RingAlloc>(ring: &Ring<Self, A>) -> Result<u32, RingError> {
        ring.claim_mpmc(Side::Consumer)
    }
}
