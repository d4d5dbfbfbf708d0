use crate::RingError;
use std::hint;
use std::thread;

/// Retry policy for operations that report [`RingError::WouldBlock`].
///
/// The ring itself never waits: full and empty come back as `WouldBlock`
/// and the caller chooses what to do with them. This type packages the
/// usual choice as a combinator over any fallible ring operation. Each
/// failed attempt escalates the wait, doubling PAUSE-hint spins for the
/// first few rounds and then yielding to the OS. Real errors pass through
/// untouched on the first occurrence.
///
/// ```
/// use slotring::{Backoff, Mpmc, Ring, RingConfig, RingError};
///
/// let ring: Ring<Mpmc> = Ring::new(RingConfig::new(4, 8))?;
/// let backoff = Backoff::new();
/// backoff.wait(|| ring.push(&7u64.to_le_bytes()))?;
/// # Ok::<(), RingError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Doubling PAUSE rounds before the first yield.
    spin_rounds: u32,
    /// Yields granted to [`try_wait`](Backoff::try_wait) before it reports
    /// exhaustion.
    yield_rounds: u32,
}

/// Largest PAUSE burst: 2^10 spin hints in one round.
const MAX_PAUSE_SHIFT: u32 = 10;

impl Backoff {
    const DEFAULT_SPIN_ROUNDS: u32 = 7;
    const DEFAULT_YIELD_ROUNDS: u32 = 24;

    /// Creates the default policy.
    pub const fn new() -> Self {
        Self {
            spin_rounds: Self::DEFAULT_SPIN_ROUNDS,
            yield_rounds: Self::DEFAULT_YIELD_ROUNDS,
        }
    }

    /// Sets the number of spin rounds before yielding begins.
    pub const fn spins(mut self, rounds: u32) -> Self {
        self.spin_rounds = rounds;
        self
    }

    /// Sets the number of yields [`try_wait`](Backoff::try_wait) performs
    /// before giving up.
    pub const fn yields(mut self, rounds: u32) -> Self {
        self.yield_rounds = rounds;
        self
    }

    /// Runs `op` until it returns anything other than `WouldBlock`,
    /// yielding indefinitely once the spin phase is spent.
    ///
    /// Use this when the peer is known to be making progress; a vanished
    /// peer leaves the call yielding forever, which is exactly the hang the
    /// bounded [`try_wait`](Backoff::try_wait) exists to avoid.
    pub fn wait<T>(
        &self,
        mut op: impl FnMut() -> Result<T, RingError>,
    ) -> Result<T, RingError> {
        let mut round = 0u32;
        loop {
            match op() {
                Err(RingError::WouldBlock) => {}
                outcome => return outcome,
            }
            if round < self.spin_rounds {
                pause(round);
                round += 1;
            } else {
                thread::yield_now();
            }
        }
    }

    /// Runs `op` like [`wait`](Backoff::wait) but gives up after the
    /// configured yield rounds, handing the final `WouldBlock` back to the
    /// caller to park, time out, or abandon.
    pub fn try_wait<T>(
        &self,
        mut op: impl FnMut() -> Result<T, RingError>,
    ) -> Result<T, RingError> {
        let mut round = 0u32;
        loop {
            match op() {
                Err(RingError::WouldBlock) => {}
                outcome => return outcome,
            }
            if round < self.spin_rounds {
                pause(round);
            } else if round < self.spin_rounds + self.yield_rounds {
                thread::yield_now();
            } else {
                return Err(RingError::WouldBlock);
            }
            round += 1;
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

/// One escalation step: 2^round PAUSE hints, capped.
#[inline]
fn pause(round: u32) {
    for _ in 0..1u32 << round.min(MAX_PAUSE_SHIFT) {
        hint::spin_loop();
    }
}
