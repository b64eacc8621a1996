//! Null sink - discards all records
//!
//! Counts what it receives and drops it. Useful for measuring pipeline
//! throughput without sink I/O and as a stand-in sink in tests.

use std::sync::atomic::{AtomicU64, Ordering};

use vitals_protocol::Record;

use crate::{Sink, SinkError};

/// Counting discard sink
#[derive(Debug, Default)]
pub struct NullSink {
    records_written: AtomicU64,
}

impl NullSink {
    /// Create a null sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records received (and discarded) so far
    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }
}

impl Sink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn write(&self, _record: &Record) -> Result<(), SinkError> {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
