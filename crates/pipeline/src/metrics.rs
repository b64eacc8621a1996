//! Pipeline metrics
//!
//! Atomic counters for the producer edge, the drain loop and the sink
//! writes. All operations use relaxed ordering; values are eventually
//! consistent, not real-time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the log manager, the drain thread and pool tasks
///
/// Safe to read from any thread at any time; readings may be slightly
/// stale while the pipeline is running.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Records accepted into the queue
    records_enqueued: AtomicU64,

    /// Records dropped because the queue was full
    records_dropped: AtomicU64,

    /// Records rejected because the manager was not running
    records_rejected: AtomicU64,

    /// Records taken off the queue by the drain thread
    records_drained: AtomicU64,

    /// Individual successful sink writes
    sink_writes: AtomicU64,

    /// Individual failed sink writes
    sink_write_errors: AtomicU64,
}

impl PipelineMetrics {
    /// Create a metrics instance with all counters at zero
    #[inline]
    pub const fn new() -> Self {
        Self {
            records_enqueued: AtomicU64::new(0),
            records_dropped: AtomicU64::new(0),
            records_rejected: AtomicU64::new(0),
            records_drained: AtomicU64::new(0),
            sink_writes: AtomicU64::new(0),
            sink_write_errors: AtomicU64::new(0),
        }
    }

    /// Record a successful enqueue
    #[inline]
    pub fn record_enqueued(&self) {
        self.records_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a drop caused by a full queue
    #[inline]
    pub fn record_dropped(&self) {
        self.records_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejection caused by the manager not running
    #[inline]
    pub fn record_rejected(&self) {
        self.records_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a record taken off the queue
    #[inline]
    pub fn record_drained(&self) {
        self.records_drained.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful sink write
    #[inline]
    pub fn record_sink_write(&self) {
        self.sink_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed sink write
    #[inline]
    pub fn record_sink_write_error(&self) {
        self.sink_write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot of all counters
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            records_enqueued: self.records_enqueued.load(Ordering::Relaxed),
            records_dropped: self.records_dropped.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            records_drained: self.records_drained.load(Ordering::Relaxed),
            sink_writes: self.sink_writes.load(Ordering::Relaxed),
            sink_write_errors: self.sink_write_errors.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.records_enqueued.store(0, Ordering::Relaxed);
        self.records_dropped.store(0, Ordering::Relaxed);
        self.records_rejected.store(0, Ordering::Relaxed);
        self.records_drained.store(0, Ordering::Relaxed);
        self.sink_writes.store(0, Ordering::Relaxed);
        self.sink_write_errors.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSnapshot {
    /// Records accepted into the queue
    pub records_enqueued: u64,
    /// Records dropped because the queue was full
    pub records_dropped: u64,
    /// Records rejected because the manager was not running
    pub records_rejected: u64,
    /// Records taken off the queue by the drain thread
    pub records_drained: u64,
    /// Individual successful sink writes
    pub sink_writes: u64,
    /// Individual failed sink writes
    pub sink_write_errors: u64,
}
