//! Log manager - the producer-facing orchestration surface
//!
//! Owns the record queue, the drain thread and (in pool mode) the worker
//! pool. Producers interact with exactly one method, [`LogManager::log`],
//! which never blocks; everything downstream of the queue is the manager's
//! problem.
//!
//! # Lifecycle
//!
//! `NotStarted → Running → Stopping → Stopped`, strictly one-way. `start`
//! and `stop` are idempotent; a stopped manager stays stopped. The drain
//! thread is spawned by `start` and joined by `stop` after the queue has
//! been closed and drained, so every record accepted before the stop is
//! delivered.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use vitals_protocol::Record;
use vitals_sinks::Sink;

use crate::metrics::PipelineMetrics;
use crate::pool::WorkerPool;
use crate::queue::BlockingQueue;

/// How the drain thread hands records to sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Write each sink inline, in sink order
    Direct,
    /// Fan each record out as one pool task per sink
    ///
    /// Tasks are not pinned to sinks, so a single sink may observe records
    /// out of queue order; each (record, sink) pair is still written
    /// exactly once.
    Pool {
        /// Worker thread count
        size: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum State {
    NotStarted = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl State {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::NotStarted,
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// Asynchronous multi-sink log manager
///
/// Shared across producer threads behind an `Arc`; all public operations
/// take `&self`. The manager cannot be cloned, and dropping it stops the
/// pipeline.
pub struct LogManager {
    app_name: String,
    sinks: Mutex<Vec<Arc<dyn Sink>>>,
    queue: Arc<BlockingQueue<Record>>,
    dispatch: Dispatch,
    state: AtomicU8,
    drain: Mutex<Option<JoinHandle<()>>>,
    metrics: Arc<PipelineMetrics>,
}

impl LogManager {
    /// Create a manager; no threads start until [`start`](Self::start)
    pub fn new(
        app_name: impl Into<String>,
        sinks: Vec<Arc<dyn Sink>>,
        buffer_capacity: usize,
        dispatch: Dispatch,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            sinks: Mutex::new(sinks),
            queue: Arc::new(BlockingQueue::new(buffer_capacity)),
            dispatch,
            state: AtomicU8::new(State::NotStarted as u8),
            drain: Mutex::new(None),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Spawn the drain thread and begin accepting records
    ///
    /// Idempotent while running. The lifecycle is one-way: calling `start`
    /// after `stop` is a no-op with a warning, never a restart.
    pub fn start(&self) {
        match self.state.compare_exchange(
            State::NotStarted as u8,
            State::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {}
            Err(current) if State::from_u8(current) == State::Running => return,
            Err(_) => {
                tracing::warn!(
                    app = %self.app_name,
                    "log manager lifecycle is one-way; ignoring start after stop"
                );
                return;
            }
        }

        // Snapshot the sink list; the drain thread works from this copy for
        // the whole lifecycle.
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let queue = Arc::clone(&self.queue);
        let metrics = Arc::clone(&self.metrics);
        let dispatch = self.dispatch;

        // Hold the handle slot across the spawn so a concurrent stop()
        // cannot observe Running without a joinable drain thread.
        let mut drain = self.drain.lock().unwrap_or_else(|e| e.into_inner());
        let handle = thread::Builder::new()
            .name("vitals-drain".into())
            .spawn(move || match dispatch {
                Dispatch::Direct => drain_direct(&queue, &sinks, &metrics),
                Dispatch::Pool { size } => drain_with_pool(&queue, &sinks, &metrics, size),
            })
            .expect("failed to spawn drain thread");
        *drain = Some(handle);
        drop(drain);

        tracing::info!(
            app = %self.app_name,
            sinks = self.sink_count(),
            capacity = self.queue.capacity(),
            dispatch = ?self.dispatch,
            "log manager started"
        );
    }

    /// Stop accepting records, drain the queue and join every thread
    ///
    /// Idempotent from any state. On return the drain thread has exited
    /// and, in pool mode, every queued sink write has completed.
    pub fn stop(&self) {
        // A manager that never ran jumps straight to Stopped.
        if self
            .state
            .compare_exchange(
                State::NotStarted as u8,
                State::Stopped as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
        {
            return;
        }

        // Only the caller that wins Running -> Stopping performs shutdown,
        // so the queue receives exactly one stop signal per lifecycle.
        if self
            .state
            .compare_exchange(
                State::Running as u8,
                State::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }

        self.queue.stop();

        let handle = self.drain.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }

        self.state.store(State::Stopped as u8, Ordering::Release);

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            app = %self.app_name,
            enqueued = snapshot.records_enqueued,
            dropped = snapshot.records_dropped,
            drained = snapshot.records_drained,
            sink_writes = snapshot.sink_writes,
            sink_write_errors = snapshot.sink_write_errors,
            "log manager stopped"
        );
    }

    /// Offer a record to the pipeline without blocking
    ///
    /// Returns `false` when the manager is not running or the queue is
    /// full; the record is dropped in both cases. This is the only signal
    /// a producer ever observes.
    pub fn log(&self, record: Record) -> bool {
        if !self.is_running() {
            self.metrics.record_rejected();
            return false;
        }

        match self.queue.try_push(record) {
            Ok(()) => {
                self.metrics.record_enqueued();
                true
            }
            Err(_) => {
                self.metrics.record_dropped();
                tracing::trace!(app = %self.app_name, "queue full, record dropped");
                false
            }
        }
    }

    /// Offer a record, waiting for queue space if necessary
    ///
    /// Opt-in alternative to [`log`](Self::log) for producers that prefer
    /// backpressure over drops. Still returns `false` once the pipeline is
    /// stopping.
    pub fn log_blocking(&self, record: Record) -> bool {
        if !self.is_running() {
            self.metrics.record_rejected();
            return false;
        }

        if self.queue.push(record) {
            self.metrics.record_enqueued();
            true
        } else {
            self.metrics.record_rejected();
            false
        }
    }

    /// Append a sink
    ///
    /// Effective only before [`start`](Self::start): the drain thread works
    /// from a snapshot taken when it is spawned, and lifecycles are
    /// one-way.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        if State::from_u8(self.state.load(Ordering::Acquire)) != State::NotStarted {
            tracing::warn!(
                app = %self.app_name,
                sink = sink.name(),
                "sink added after start is not seen by the drain thread"
            );
        }
        self.sinks.lock().unwrap_or_else(|e| e.into_inner()).push(sink);
    }

    /// True while records are being accepted
    #[inline]
    pub fn is_running(&self) -> bool {
        State::from_u8(self.state.load(Ordering::Acquire)) == State::Running
    }

    /// Application name stamped on this pipeline's diagnostics
    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Configured dispatch mode
    #[inline]
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Record queue capacity
    pub fn buffer_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Number of records currently waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Pipeline counters
    #[inline]
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }
}

impl Drop for LogManager {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for LogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogManager")
            .field("app_name", &self.app_name)
            .field("dispatch", &self.dispatch)
            .field("running", &self.is_running())
            .field("sinks", &self.sink_count())
            .finish()
    }
}

/// Direct mode: write every sink inline, in sink order
fn drain_direct(
    queue: &BlockingQueue<Record>,
    sinks: &[Arc<dyn Sink>],
    metrics: &Arc<PipelineMetrics>,
) {
    while let Some(record) = queue.pop() {
        metrics.record_drained();
        for sink in sinks {
            write_to_sink(sink.as_ref(), &record, metrics);
        }
    }
}

/// Pool mode: one write task per (record, sink) pair
fn drain_with_pool(
    queue: &BlockingQueue<Record>,
    sinks: &[Arc<dyn Sink>],
    metrics: &Arc<PipelineMetrics>,
    pool_size: usize,
) {
    let pool = WorkerPool::new(pool_size);

    while let Some(record) = queue.pop() {
        metrics.record_drained();
        let record = Arc::new(record);

        for sink in sinks {
            let sink = Arc::clone(sink);
            let record = Arc::clone(&record);
            let metrics = Arc::clone(metrics);

            // The pool cannot be stopped while we hold it; a submit error
            // here would mean the invariant is broken, not a full queue.
            let _ = pool.submit(move || write_to_sink(sink.as_ref(), &record, &metrics));
        }
    }

    // Dropping the pool runs every queued write task, then joins the
    // workers; only after that does the drain thread exit.
}

fn write_to_sink(sink: &dyn Sink, record: &Record, metrics: &PipelineMetrics) {
    match sink.write(record) {
        Ok(()) => metrics.record_sink_write(),
        Err(error) => {
            metrics.record_sink_write_error();
            tracing::warn!(
                sink = sink.name(),
                %error,
                "sink write failed; record dropped for this sink"
            );
        }
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;
