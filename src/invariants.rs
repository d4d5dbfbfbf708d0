//! Debug assertion macros for the sequence-number protocol.
//!
//! Active only in debug builds; release builds compile them away entirely.
//! Each macro states one invariant of the slot state machine so a violation
//! names the broken rule instead of a bare `assertion failed`.

/// Assert that occupancy never exceeds capacity.
///
/// `head - tail` (wrapping) counts claimed-but-unreleased positions and must
/// stay within `capacity`.
macro_rules! debug_assert_bounded_occupancy {
    ($head:expr, $tail:expr, $capacity:expr) => {
        debug_assert!(
            $head.wrapping_sub($tail) <= $capacity,
            "occupancy {} exceeds capacity {} (head {}, tail {})",
            $head.wrapping_sub($tail),
            $capacity,
            $head,
            $tail
        )
    };
}

/// Assert that a slot is still in the claimed state when a producer
/// publishes it: `seq == pos` from claim until publish.
macro_rules! debug_assert_slot_claimed {
    ($seq:expr, $pos:expr) => {
        debug_assert!(
            $seq == $pos,
            "publishing slot whose seq {} != claimed position {}",
            $seq,
            $pos
        )
    };
}

/// Assert that a slot is still in the published state when a consumer
/// releases it: `seq == pos + 1` from claim until release.
macro_rules! debug_assert_slot_filled {
    ($seq:expr, $pos:expr) => {
        debug_assert!(
            $seq == $pos.wrapping_add(1),
            "releasing slot whose seq {} != published position {} + 1",
            $seq,
            $pos
        )
    };
}

pub(crate) use debug_assert_bounded_occupancy;
pub(crate) use debug_assert_slot_claimed;
pub(crate) use debug_assert_slot_filled;
