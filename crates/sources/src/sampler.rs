//! Sampler - the producer thread
//!
//! A sampler owns one [`Source`], polls it at a fixed interval, classifies
//! each raw sample under its policy and offers the resulting record to the
//! log manager via the non-blocking `log`. Unparseable samples and queue
//! drops are logged and forgotten; a sampler never blocks on the pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use vitals_pipeline::LogManager;
use vitals_protocol::{Classifier, Policy};

use crate::Source;

/// Granularity of the poll sleep, so shutdown is honored promptly even
/// with long poll intervals
pub const SAMPLER_SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Polls one telemetry source and feeds the pipeline
///
/// The policy is fixed at the type level, matching the source dimension
/// this sampler reads (CPU, GPU or RAM).
pub struct Sampler<P> {
    name: String,
    source: Box<dyn Source>,
    classifier: Classifier<P>,
    interval: Duration,
}

impl<P: Policy + Send + 'static> Sampler<P> {
    /// Create a sampler
    ///
    /// `name` labels the thread and diagnostics; `interval` is the poll
    /// period.
    pub fn new(
        name: impl Into<String>,
        source: Box<dyn Source>,
        classifier: Classifier<P>,
        interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            classifier,
            interval,
        }
    }

    /// Source label used in diagnostics
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the poll loop on the current thread
    ///
    /// Returns when `shutdown` is set or the manager stops. The loop also
    /// exits immediately when the source fails to open.
    pub fn run(mut self, manager: &LogManager, shutdown: &AtomicBool) {
        if !self.source.open() {
            tracing::error!(source = %self.name, "telemetry source failed to open; sampler exiting");
            return;
        }

        tracing::info!(
            source = %self.name,
            context = %P::CONTEXT,
            interval_ms = self.interval.as_millis() as u64,
            "sampler started"
        );

        let mut raw = String::new();
        while !shutdown.load(Ordering::Relaxed) && manager.is_running() {
            raw.clear();
            if self.source.read(&mut raw) {
                match self.classifier.format(&raw) {
                    Some(record) => {
                        if !manager.log(record) {
                            tracing::debug!(
                                source = %self.name,
                                "record not accepted (queue full or pipeline stopping)"
                            );
                        }
                    }
                    None => {
                        tracing::debug!(source = %self.name, raw = %raw, "unparseable sample dropped");
                    }
                }
            }

            // Sleep in slices so a shutdown lands within one slice, not one
            // full interval.
            let mut remaining = self.interval;
            while !remaining.is_zero()
                && !shutdown.load(Ordering::Relaxed)
                && manager.is_running()
            {
                let slice = remaining.min(SAMPLER_SLEEP_SLICE);
                thread::sleep(slice);
                remaining -= slice;
            }
        }

        tracing::info!(source = %self.name, "sampler stopped");
    }

    /// Run the poll loop on a dedicated named thread
    pub fn spawn(self, manager: Arc<LogManager>, shutdown: Arc<AtomicBool>) -> JoinHandle<()> {
        let thread_name = format!("vitals-sampler-{}", self.name);
        thread::Builder::new()
            .name(thread_name)
            .spawn(move || self.run(&manager, &shutdown))
            .expect("failed to spawn sampler thread")
    }
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;
