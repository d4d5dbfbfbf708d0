//! Optional operation counters.
//!
//! Collection is gated by [`RingConfig::enable_metrics`]; when disabled the
//! claim paths pay one predictable branch and touch no counter.
//!
//! [`RingConfig::enable_metrics`]: crate::RingConfig

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters updated by the claim paths.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    pushes: AtomicU64,
    pops: AtomicU64,
    full_rejections: AtomicU64,
    empty_rejections: AtomicU64,
    contended_claims: AtomicU64,
}

impl Metrics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_push(&self) {
        self.pushes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_pop(&self) {
        self.pops.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_full(&self) {
        self.full_rejections.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_empty(&self) {
        self.empty_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// A claim loop iteration lost a race (failed CAS or stale position).
    #[inline]
    pub(crate) fn record_contention(&self) {
        self.contended_claims.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pushes: self.pushes.load(Ordering::Relaxed),
            pops: self.pops.load(Ordering::Relaxed),
            full_rejections: self.full_rejections.load(Ordering::Relaxed),
            empty_rejections: self.empty_rejections.load(Ordering::Relaxed),
            contended_claims: self.contended_claims.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful producer claims.
    pub pushes: u64,
    /// Successful consumer claims.
    pub pops: u64,
    /// Producer claims rejected because the ring was full.
    pub full_rejections: u64,
    /// Consumer claims rejected because the ring was empty.
    pub empty_rejections: u64,
    /// Claim-loop iterations lost to a concurrent peer (MPMC only).
    pub contended_claims: u64,
}
