use crate::handle::{Consumer, Producer};
use crate::invariants::debug_assert_bounded_occupancy;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::slot::{PopSlot, PushSlot};
use crate::{Mode, Mpmc, RingAlloc, RingConfig, RingError, Spsc, SystemAlloc};
use crossbeam_utils::CachePadded;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// =============================================================================
// MEMORY ORDERING & SYNCHRONIZATION STRATEGY
// =============================================================================
//
// Every slot carries a 32-bit atomic sequence number that encodes its state
// relative to the monotonically growing head/tail counters. With
// mask = capacity - 1, the slot at index pos & mask holds:
//
//   seq == pos            free: the producer arriving at pos may claim it
//   seq == pos + 1        full: the consumer arriving at pos may claim it
//   seq == pos + capacity free again, for the producer of the next lap
//
// Counters and sequence numbers wrap at 2^32; all comparisons are done on
// the signed difference `(seq - expected) as i32`, which stays correct as
// long as fewer than 2^31 operations are outstanding between peers.
//
// ## Ordering protocol
//
// **Producer:**
// 1. Load `head` with Relaxed (SPSC: sole writer; MPMC: CAS below rechecks)
// 2. Load the slot's `seq` with Acquire (synchronizes with the releasing
//    consumer, so the slot's bytes are ours to overwrite)
// 3. Advance `head` with a Relaxed store (SPSC) or Relaxed CAS (MPMC);
//    the counter carries no payload visibility, `seq` does all of it
// 4. Write payload bytes (exclusive: no ordering needed)
// 5. Store `seq = pos + 1` with Release (publishes the payload)
//
// **Consumer:** symmetric, reading from `tail`, waiting for seq == pos + 1,
// and finishing with a Release store of `seq = pos + capacity`.
//
// No fences beyond these are required; in particular the CAS on the counter
// is Relaxed/Relaxed because a winner's subsequent seq store is what other
// threads synchronize with.
//
// ## False sharing
//
// `head` and `tail` each live on their own padded cache line; the slot
// array is a separate allocation. Adjacent slots may share a line; that is
// accepted and offset by the payload stride in typical configurations.
//
// =============================================================================

/// Byte offset of the payload within a slot record.
const SEQ_BYTES: usize = mem::size_of::<AtomicU32>();
/// Required alignment of a slot record.
const SEQ_ALIGN: usize = mem::align_of::<AtomicU32>();

/// Which counter a claim operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Producer,
    Consumer,
}

impl Side {
    /// A producer claims a free slot (`seq == pos`); a consumer claims a
    /// published one (`seq == pos + 1`).
    #[inline]
    fn seq_offset(self) -> u32 {
        match self {
            Side::Producer => 0,
            Side::Consumer => 1,
        }
    }
}

/// Bounded lock-free ring buffer for fixed-size byte messages.
///
/// `M` selects the claim discipline ([`Spsc`] or [`Mpmc`]) at compile time;
/// `A` is the allocator the slot array is acquired from at construction and
/// returned to at destruction. All memory is acquired once: the hot path
/// performs only atomic operations, index masking, and `memcpy`.
///
/// An MPMC ring is driven directly through a shared reference (wrap it in an
/// [`Arc`] to share across threads). An SPSC ring must first be [`split`]
/// into its [`Producer`] and [`Consumer`] handles.
///
/// # Example
///
/// ```
/// use slotring::{Mpmc, Ring, RingConfig, RingError};
///
/// let ring: Ring<Mpmc> = Ring::new(RingConfig::new(8, 4))?;
/// ring.push(&1u32.to_le_bytes())?;
///
/// let mut buf = [0u8; 4];
/// ring.pop(&mut buf)?;
/// assert_eq!(u32::from_le_bytes(buf), 1);
/// # Ok::<(), RingError>(())
/// ```
///
/// [`split`]: Ring::split
pub struct Ring<M: Mode, A: RingAlloc = SystemAlloc> {
    /// Base of the slot region; null once destroyed.
    slots: *mut u8,
    slot_size: u32,
    stride: u32,
    mask: u32,
    enable_metrics: bool,
    alloc: A,
    metrics: Metrics,
    head: CachePadded<AtomicU32>,
    tail: CachePadded<AtomicU32>,
    _mode: PhantomData<M>,
}

// SAFETY: the ring owns its slot region; cross-thread access to counters and
// sequence fields goes through atomics, and payload bytes are only touched
// inside the exclusive claim window a guard represents.
unsafe impl<M: Mode, A: RingAlloc + Send> Send for Ring<M, A> {}
unsafe impl<M: Mode, A: RingAlloc + Sync> Sync for Ring<M, A> {}

impl<M: Mode> Ring<M> {
    /// Creates a ring backed by the system heap.
    pub fn new(config: RingConfig) -> Result<Self, RingError> {
        Self::with_alloc(config, SystemAlloc)
    }
}

impl<M: Mode, A: RingAlloc> Ring<M, A> {
    /// Creates a ring whose slot array comes from `alloc`.
    ///
    /// Validates the configuration (`InvalidArgument`) before touching the
    /// allocator; a refused allocation reports `OutOfMemory` and constructs
    /// nothing.
    pub fn with_alloc(config: RingConfig, alloc: A) -> Result<Self, RingError> {
        Self::build(config, alloc, 0)
    }

    fn build(config: RingConfig, alloc: A, start_pos: u32) -> Result<Self, RingError> {
        config.validate()?;

        let stride64 =
            (SEQ_BYTES as u64 + u64::from(config.slot_size) + (SEQ_ALIGN as u64 - 1))
                & !(SEQ_ALIGN as u64 - 1);
        let stride = u32::try_from(stride64)
            .map_err(|_| RingError::InvalidArgument("slot stride exceeds u32"))?;
        let region = (config.capacity as usize)
            .checked_mul(stride as usize)
            .ok_or(RingError::InvalidArgument("slot region size overflows"))?;

        let base = alloc.allocate(region, 0).ok_or(RingError::OutOfMemory)?;

        // SAFETY: base is valid for `region` bytes. Zeroing makes every
        // payload byte defined before the first claim hands out a slice.
        unsafe { ptr::write_bytes(base.as_ptr(), 0, region) };

        let ring = Self {
            slots: base.as_ptr(),
            slot_size: config.slot_size,
            stride,
            mask: config.mask(),
            enable_metrics: config.enable_metrics,
            alloc,
            metrics: Metrics::new(),
            head: CachePadded::new(AtomicU32::new(start_pos)),
            tail: CachePadded::new(AtomicU32::new(start_pos)),
            _mode: PhantomData,
        };

        // Slot i starts one full lap ready for position start_pos + i.
        // Release stores so a ring handed to already-running threads is
        // published without relying on a thread-launch edge.
        for i in 0..config.capacity {
            let pos = start_pos.wrapping_add(i);
            ring.slot_seq(pos).store(pos, Ordering::Release);
        }

        Ok(ring)
    }

    /// Test hook: start the counters at an arbitrary position so wraparound
    /// is exercised without 2^32 operations.
    #[cfg(test)]
    pub(crate) fn with_start_pos(
        config: RingConfig,
        alloc: A,
        start_pos: u32,
    ) -> Result<Self, RingError> {
        Self::build(config, alloc, start_pos)
    }

    // ---------------------------------------------------------------------
    // OBSERVERS
    // ---------------------------------------------------------------------

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.mask.wrapping_add(1)
    }

    /// Payload bytes per slot.
    #[inline]
    pub fn slot_size(&self) -> u32 {
        self.slot_size
    }

    /// Byte stride between consecutive slot records.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Positions claimed by producers and not yet claimed by consumers.
    /// Exact when quiescent, a snapshot under concurrency.
    #[inline]
    pub fn len(&self) -> u32 {
        self.head
            .load(Ordering::Relaxed)
            .wrapping_sub(self.tail.load(Ordering::Relaxed))
    }

    /// Returns true if no message is waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Counter snapshot if metrics were enabled, zeros otherwise.
    pub fn metrics(&self) -> MetricsSnapshot {
        if self.enable_metrics {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::default()
        }
    }

    // ---------------------------------------------------------------------
    // SLOT ADDRESSING
    // ---------------------------------------------------------------------

    #[inline]
    fn slot_ptr(&self, pos: u32) -> *mut u8 {
        // SAFETY: pos & mask < capacity, so the offset stays inside the
        // region; callers only address slots while `slots` is live.
        unsafe {
            self.slots
                .add(((pos & self.mask) as usize) * self.stride as usize)
        }
    }

    #[inline]
    fn slot_seq(&self, pos: u32) -> &AtomicU32 {
        // SAFETY: the record starts with its sequence field, stride-aligned
        // for AtomicU32 by construction.
        unsafe { &*self.slot_ptr(pos).cast::<AtomicU32>() }
    }

    #[inline]
    fn slot_data(&self, pos: u32) -> *mut u8 {
        // SAFETY: payload begins SEQ_BYTES into the record; slot_size bytes
        // of it are inside the region by the stride computation.
        unsafe { self.slot_ptr(pos).add(SEQ_BYTES) }
    }

    #[inline]
    fn ensure_live(&self) -> Result<(), RingError> {
        if self.slots.is_null() {
            return Err(RingError::InvalidArgument("ring used after destroy"));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // CLAIM PATHS
    // ---------------------------------------------------------------------

    /// Wait-free claim: only one thread ever advances this counter.
    pub(crate) fn claim_spsc(&self, side: Side) -> Result<u32, RingError> {
        self.ensure_live()?;
        let counter: &AtomicU32 = match side {
            Side::Producer => &*self.head,
            Side::Consumer => &*self.tail,
        };

        let pos = counter.load(Ordering::Relaxed);
        // Acquire: pairs with the Release store of the peer that last moved
        // this slot (publish for consumers, release for producers).
        let seq = self.slot_seq(pos).load(Ordering::Acquire);
        if seq != pos.wrapping_add(side.seq_offset()) {
            self.record_reject(side);
            return Err(RingError::WouldBlock);
        }

        // Sole writer of this counter; the seq store at publish/release
        // carries the cross-thread ordering.
        counter.store(pos.wrapping_add(1), Ordering::Relaxed);
        self.record_claim(side, pos);
        Ok(pos)
    }

    /// Lock-free claim: compare-and-swap the counter, retrying against a
    /// fresh value whenever a peer wins the position.
    pub(crate) fn claim_mpmc(&self, side: Side) -> Result<u32, RingError> {
        self.ensure_live()?;
        let counter: &AtomicU32 = match side {
            Side::Producer => &*self.head,
            Side::Consumer => &*self.tail,
        };
        let offset = side.seq_offset();

        let mut pos = counter.load(Ordering::Relaxed);
        loop {
            let seq = self.slot_seq(pos).load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(offset)) as i32;

            if diff == 0 {
                // Relaxed/Relaxed: winning the counter conveys no payload
                // visibility; the slot's seq field does.
                match counter.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        self.record_claim(side, pos);
                        return Ok(pos);
                    }
                    Err(observed) => {
                        // A peer advanced the counter (or the CAS failed
                        // spuriously); retry with what it saw.
                        self.record_contention();
                        pos = observed;
                    }
                }
            } else if diff < 0 {
                // The slot still belongs to the previous lap: full for
                // producers, empty for consumers.
                self.record_reject(side);
                return Err(RingError::WouldBlock);
            } else {
                // A peer already claimed this position. Progress requires a
                // fresh counter value, never a spin on the stale one.
                self.record_contention();
                pos = counter.load(Ordering::Relaxed);
            }
        }
    }

    #[inline]
    fn record_claim(&self, side: Side, pos: u32) {
        match side {
            Side::Producer => {
                debug_assert_bounded_occupancy!(
                    pos.wrapping_add(1),
                    self.tail.load(Ordering::Relaxed),
                    self.capacity()
                );
                if self.enable_metrics {
                    self.metrics.record_push();
                }
            }
            Side::Consumer => {
                debug_assert_bounded_occupancy!(
                    self.head.load(Ordering::Relaxed),
                    pos.wrapping_add(1),
                    self.capacity()
                );
                if self.enable_metrics {
                    self.metrics.record_pop();
                }
            }
        }
    }

    #[inline]
    fn record_reject(&self, side: Side) {
        if self.enable_metrics {
            match side {
                Side::Producer => self.metrics.record_full(),
                Side::Consumer => self.metrics.record_empty(),
            }
        }
    }

    #[inline]
    fn record_contention(&self) {
        if self.enable_metrics {
            self.metrics.record_contention();
        }
    }

    // ---------------------------------------------------------------------
    // OPERATIONS (single state machine for both modes and all facades)
    // ---------------------------------------------------------------------

    pub(crate) fn raw_push_claim(&self) -> Result<PushSlot<'_>, RingError> {
        let pos = M::push_claim(self)?;
        Ok(PushSlot::new(
            self.slot_seq(pos),
            self.slot_data(pos),
            self.slot_size as usize,
            pos,
        ))
    }

    pub(crate) fn raw_pop_claim(&self) -> Result<PopSlot<'_>, RingError> {
        let pos = M::pop_claim(self)?;
        Ok(PopSlot::new(
            self.slot_seq(pos),
            self.slot_data(pos),
            self.slot_size as usize,
            pos,
            pos.wrapping_add(self.capacity()),
        ))
    }

    /// Copy shim over claim + publish. Rejects oversized payloads before
    /// touching the ring.
    pub(crate) fn raw_push(&self, src: &[u8]) -> Result<(), RingError> {
        if src.len() > self.slot_size as usize {
            return Err(RingError::InvalidArgument("payload exceeds slot_size"));
        }
        let mut slot = self.raw_push_claim()?;
        slot.payload_mut()[..src.len()].copy_from_slice(src);
        slot.publish();
        Ok(())
    }

    /// Copy shim over claim + release. `dst.len()` bytes are copied out and
    /// must not exceed `slot_size`.
    pub(crate) fn raw_pop(&self, dst: &mut [u8]) -> Result<(), RingError> {
        if dst.len() > self.slot_size as usize {
            return Err(RingError::InvalidArgument("read exceeds slot_size"));
        }
        let slot = self.raw_pop_claim()?;
        dst.copy_from_slice(&slot.payload()[..dst.len()]);
        slot.release();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // LIFECYCLE
    // ---------------------------------------------------------------------

    /// Returns the slot array to the allocator. Idempotent: the first call
    /// frees, every later call is a no-op. A destroyed ring answers all
    /// push/pop operations with `InvalidArgument`.
    ///
    /// Destruction does not synchronize with in-flight operations; callers
    /// must ensure quiescence. `&mut self` makes that structural for
    /// un-shared rings.
    pub fn destroy(&mut self) {
        let Some(base) = NonNull::new(self.slots) else {
            return;
        };
        self.slots = ptr::null_mut();
        let region = (self.capacity() as usize) * self.stride as usize;
        // SAFETY: base came from self.alloc.allocate(region, 0) and is
        // handed back exactly once thanks to the null sentinel above.
        unsafe { self.alloc.free(base, region, 0) };
    }
}

impl<M: Mode, A: RingAlloc> Drop for Ring<M, A> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<M: Mode, A: RingAlloc> std::fmt::Debug for Ring<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity())
            .field("slot_size", &self.slot_size)
            .field("len", &self.len())
            .field("destroyed", &self.slots.is_null())
            .finish()
    }
}

// ---------------------------------------------------------------------
// MODE FACADES
// ---------------------------------------------------------------------

impl<A: RingAlloc> Ring<Mpmc, A> {
    /// Claims a free slot for writing. `WouldBlock` means full.
    #[inline]
    pub fn push_claim(&self) -> Result<PushSlot<'_>, RingError> {
        self.raw_push_claim()
    }

    /// Claims a published slot for reading. `WouldBlock` means empty.
    #[inline]
    pub fn pop_claim(&self) -> Result<PopSlot<'_>, RingError> {
        self.raw_pop_claim()
    }

    /// Copies `src` into the next free slot and publishes it.
    #[inline]
    pub fn push(&self, src: &[u8]) -> Result<(), RingError> {
        self.raw_push(src)
    }

    /// Copies `dst.len()` bytes out of the next published slot and releases
    /// it.
    #[inline]
    pub fn pop(&self, dst: &mut [u8]) -> Result<(), RingError> {
        self.raw_pop(dst)
    }
}

impl<A: RingAlloc> Ring<Spsc, A> {
    /// Splits the ring into its two exclusive endpoints.
    ///
    /// The handles share ownership; the slot array is freed when the last
    /// one drops.
    pub fn split(self) -> (Producer<A>, Consumer<A>) {
        let ring = Arc::new(self);
        (
            Producer::new(Arc::clone(&ring)),
            Consumer::new(ring),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;

    fn mpmc(capacity: u32, slot_size: u32) -> Ring<Mpmc> {
        Ring::new(RingConfig::new(capacity, slot_size)).unwrap()
    }

    #[test]
    fn test_push_pop_in_order() {
        let ring = mpmc(4, 8);
        for v in 1u64..=3 {
            ring.push(&v.to_le_bytes()).unwrap();
        }
        for v in 1u64..=3 {
            let mut buf = [0u8; 8];
            ring.pop(&mut buf).unwrap();
            assert_eq!(u64::from_le_bytes(buf), v);
        }
        assert_eq!(ring.pop(&mut [0u8; 8]), Err(RingError::WouldBlock));
    }

    #[test]
    fn test_fill_to_capacity_then_recycle() {
        let ring = mpmc(2, 1);
        ring.push(&[0xAA]).unwrap();
        ring.push(&[0xBB]).unwrap();
        assert_eq!(ring.push(&[0xCC]), Err(RingError::WouldBlock));
        assert!(ring.is_full());

        let mut b = [0u8];
        ring.pop(&mut b).unwrap();
        assert_eq!(b, [0xAA]);

        ring.push(&[0xCC]).unwrap();
        ring.pop(&mut b).unwrap();
        assert_eq!(b, [0xBB]);
        ring.pop(&mut b).unwrap();
        assert_eq!(b, [0xCC]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_pop_empty_would_block() {
        let ring = mpmc(8, 4);
        assert_eq!(ring.pop(&mut [0u8; 4]), Err(RingError::WouldBlock));
    }

    #[test]
    fn test_oversized_payload_leaves_ring_untouched() {
        let ring = mpmc(4, 4);
        assert!(matches!(
            ring.push(&[0u8; 5]),
            Err(RingError::InvalidArgument(_))
        ));
        assert!(matches!(
            ring.pop(&mut [0u8; 5]),
            Err(RingError::InvalidArgument(_))
        ));
        // A full round-trip still works, so the failed calls moved nothing.
        ring.push(&[1, 2, 3, 4]).unwrap();
        let mut buf = [0u8; 4];
        ring.pop(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_short_payload_copies_prefix() {
        let ring = mpmc(4, 8);
        ring.push(&[7, 7]).unwrap();
        let mut buf = [0xFFu8; 2];
        ring.pop(&mut buf).unwrap();
        assert_eq!(buf, [7, 7]);
    }

    #[test]
    fn test_claim_guard_roundtrip() {
        let ring = mpmc(2, 4);
        let mut slot = ring.push_claim().unwrap();
        let pos = slot.pos();
        slot.payload_mut().copy_from_slice(&[9, 8, 7, 6]);
        slot.publish();

        let slot = ring.pop_claim().unwrap();
        assert_eq!(slot.pos(), pos);
        assert_eq!(slot.payload(), &[9, 8, 7, 6]);
        slot.release();

        // The released slot is reusable one lap later.
        ring.push(&[1, 1, 1, 1]).unwrap();
        ring.push(&[2, 2, 2, 2]).unwrap();
        assert_eq!(ring.push(&[3, 3, 3, 3]), Err(RingError::WouldBlock));
    }

    #[test]
    fn test_dropped_push_guard_publishes() {
        let ring = mpmc(2, 1);
        {
            let mut slot = ring.push_claim().unwrap();
            slot.payload_mut()[0] = 42;
            // Guard dropped without an explicit publish.
        }
        let mut b = [0u8];
        ring.pop(&mut b).unwrap();
        assert_eq!(b, [42]);
    }

    #[test]
    fn test_stride_is_seq_aligned() {
        let ring = mpmc(2, 5);
        assert_eq!(ring.stride() as usize % SEQ_ALIGN, 0);
        assert_eq!(ring.stride(), 12); // 4-byte header + 5 payload, rounded up
    }

    #[test]
    fn test_wraparound_across_counter_overflow() {
        // Start the counters 8 positions before 2^32 and run far past it.
        let start = u32::MAX - 7;
        let ring: Ring<Mpmc> =
            Ring::with_start_pos(RingConfig::new(4, 4), SystemAlloc, start).unwrap();

        for i in 0u32..100_000 {
            ring.push(&i.to_le_bytes()).unwrap();
            let mut buf = [0u8; 4];
            ring.pop(&mut buf).unwrap();
            assert_eq!(u32::from_le_bytes(buf), i, "iteration {i}");
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_wraparound_full_ring() {
        let start = u32::MAX - 1;
        let ring: Ring<Mpmc> =
            Ring::with_start_pos(RingConfig::new(2, 4), SystemAlloc, start).unwrap();

        ring.push(&[1, 0, 0, 0]).unwrap();
        ring.push(&[2, 0, 0, 0]).unwrap(); // head wraps to 0 here
        assert_eq!(ring.push(&[3, 0, 0, 0]), Err(RingError::WouldBlock));

        let mut buf = [0u8; 4];
        ring.pop(&mut buf).unwrap();
        assert_eq!(buf[0], 1);
        ring.pop(&mut buf).unwrap();
        assert_eq!(buf[0], 2);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut ring = mpmc(4, 4);
        ring.push(&[1, 2, 3, 4]).unwrap();
        ring.destroy();
        ring.destroy();
        ring.destroy();
        assert!(matches!(
            ring.push(&[0u8; 4]),
            Err(RingError::InvalidArgument(_))
        ));
        assert!(matches!(
            ring.pop(&mut [0u8; 4]),
            Err(RingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_destroy_then_rebuild_with_different_shape() {
        let mut ring = mpmc(4, 8);
        ring.push(&[0u8; 8]).unwrap();
        ring.destroy();

        ring = mpmc(16, 2);
        ring.push(&[5, 6]).unwrap();
        let mut buf = [0u8; 2];
        ring.pop(&mut buf).unwrap();
        assert_eq!(buf, [5, 6]);
    }

    #[test]
    fn test_arena_backed_ring() {
        let config = RingConfig::new(8, 16);
        let ring: Ring<Mpmc, Arena> =
            Ring::with_alloc(config, Arena::with_capacity(8 * 1024)).unwrap();
        for i in 0u8..8 {
            ring.push(&[i; 16]).unwrap();
        }
        assert_eq!(ring.push(&[0; 16]), Err(RingError::WouldBlock));
        let mut buf = [0u8; 16];
        for i in 0u8..8 {
            ring.pop(&mut buf).unwrap();
            assert_eq!(buf, [i; 16]);
        }
    }

    #[test]
    fn test_arena_too_small_reports_out_of_memory() {
        let config = RingConfig::new(1024, 1024);
        let err = Ring::<Mpmc, Arena>::with_alloc(config, Arena::with_capacity(64)).unwrap_err();
        assert_eq!(err, RingError::OutOfMemory);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        for (capacity, slot_size) in [(0, 8), (1, 8), (3, 8), (6, 8), (4, 0)] {
            let err = Ring::<Mpmc>::new(RingConfig::new(capacity, slot_size)).unwrap_err();
            assert!(
                matches!(err, RingError::InvalidArgument(_)),
                "capacity {capacity}, slot_size {slot_size}"
            );
        }
    }

    #[test]
    fn test_metrics_counts() {
        let ring = Ring::<Mpmc>::new(RingConfig::new(2, 1).metrics(true)).unwrap();
        ring.push(&[1]).unwrap();
        ring.push(&[2]).unwrap();
        let _ = ring.push(&[3]); // full
        let mut b = [0u8];
        ring.pop(&mut b).unwrap();

        let m = ring.metrics();
        assert_eq!(m.pushes, 2);
        assert_eq!(m.pops, 1);
        assert_eq!(m.full_rejections, 1);
        assert_eq!(m.empty_rejections, 0);
    }

    #[test]
    fn test_metrics_disabled_reads_zero() {
        let ring = mpmc(2, 1);
        ring.push(&[1]).unwrap();
        assert_eq!(ring.metrics(), MetricsSnapshot::default());
    }
}
