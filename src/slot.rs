//! Claim tokens handed out by the producer and consumer paths.
//!
//! A claimed slot is owned exclusively by the holder of its guard: the
//! producer writes payload bytes through [`PushSlot::payload_mut`] and the
//! consumer reads through [`PopSlot::payload`]. The guard publishes or
//! releases the slot exactly once, on an explicit [`PushSlot::publish`] /
//! [`PopSlot::release`] call, or on drop. Publishing a foreign token,
//! publishing twice, or forgetting to publish are therefore unrepresentable.

use crate::invariants::{debug_assert_slot_claimed, debug_assert_slot_filled};
use std::slice;
use std::sync::atomic::{AtomicU32, Ordering};

/// Writable claim on one slot, obtained from a producer-side claim.
///
/// Dropping the guard publishes the slot as-is; the payload region starts
/// zeroed and retains whatever the previous occupant left, so an unwritten
/// publish carries defined (if stale) bytes.
pub struct PushSlot<'a> {
    seq: &'a AtomicU32,
    data: *mut u8,
    len: usize,
    pos: u32,
}

// SAFETY: the guard is the sole accessor of its payload bytes between claim
// and publish; moving it to another thread moves that exclusive access.
unsafe impl Send for PushSlot<'_> {}

impl<'a> PushSlot<'a> {
    /// `seq`/`data` must point into the slot claimed at `pos`, with `data`
    /// valid for `len` initialized bytes for `'a`.
    pub(crate) fn new(seq: &'a AtomicU32, data: *mut u8, len: usize, pos: u32) -> Self {
        Self { seq, data, len, pos }
    }

    /// The claimed position token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The slot's payload region, `slot_size` bytes.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        // SAFETY: claim granted exclusive access to these bytes until
        // publish; the region was zero-initialized at ring construction.
        unsafe { slice::from_raw_parts_mut(self.data, self.len) }
    }

    /// Publishes the payload to the consumer that will read this position.
    ///
    /// Equivalent to dropping the guard; provided so call sites can state
    /// intent.
    #[inline]
    pub fn publish(self) {}
}

impl Drop for PushSlot<'_> {
    #[inline]
    fn drop(&mut self) {
        debug_assert_slot_claimed!(self.seq.load(Ordering::Relaxed), self.pos);
        // Release: makes every payload write above visible to the consumer
        // whose acquire load observes pos + 1.
        self.seq.store(self.pos.wrapping_add(1), Ordering::Release);
    }
}

impl std::fmt::Debug for PushSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushSlot")
            .field("pos", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}

/// Readable claim on one published slot, obtained from a consumer-side claim.
///
/// Dropping the guard releases the slot back to the free pool for the
/// producer that will next arrive at `pos + capacity`.
pub struct PopSlot<'a> {
    seq: &'a AtomicU32,
    data: *const u8,
    len: usize,
    pos: u32,
    /// `pos + capacity`, precomputed at claim.
    release_seq: u32,
}

// SAFETY: the guard is the sole accessor of its payload bytes between claim
// and release; moving it to another thread moves that exclusive access.
unsafe impl Send for PopSlot<'_> {}

impl<'a> PopSlot<'a> {
    /// `seq`/`data` must point into the slot claimed at `pos`, with `data`
    /// valid for `len` initialized bytes for `'a`; `release_seq` is
    /// `pos + capacity`.
    pub(crate) fn new(
        seq: &'a AtomicU32,
        data: *const u8,
        len: usize,
        pos: u32,
        release_seq: u32,
    ) -> Self {
        Self { seq, data, len, pos, release_seq }
    }

    /// The claimed position token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// The slot's payload region, `slot_size` bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        // SAFETY: claim observed seq == pos + 1 with acquire ordering, so
        // every byte the producer wrote before its release store is visible;
        // no other thread touches the slot until we release it.
        unsafe { slice::from_raw_parts(self.data, self.len) }
    }

    /// Returns the slot to the free pool.
    ///
    /// Equivalent to dropping the guard; provided so call sites can state
    /// intent.
    #[inline]
    pub fn release(self) {}
}

impl Drop for PopSlot<'_> {
    #[inline]
    fn drop(&mut self) {
        debug_assert_slot_filled!(self.seq.load(Ordering::Relaxed), self.pos);
        // Release: the producer that claims this slot for pos + capacity
        // must not observe it free before our payload reads retired.
        self.seq.store(self.release_seq, Ordering::Release);
    }
}

impl std::fmt::Debug for PopSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopSlot")
            .field("pos", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}
