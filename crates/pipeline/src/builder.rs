//! Log manager builder
//!
//! Fluent construction of a fully-initialized [`LogManager`]. The built
//! manager is complete before any thread exists; there is no partially
//! started state to observe.

use std::sync::Arc;

use vitals_sinks::{ConsoleSink, Sink};

use crate::manager::{Dispatch, LogManager};
use crate::{DEFAULT_BUFFER_CAPACITY, DEFAULT_POOL_SIZE};

/// Builder for [`LogManager`]
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vitals_pipeline::LogManagerBuilder;
/// use vitals_sinks::NullSink;
///
/// let manager = LogManagerBuilder::new()
///     .app_name("vitals")
///     .sink(Arc::new(NullSink::new()))
///     .buffer_capacity(256)
///     .worker_pool(4)
///     .build();
/// ```
pub struct LogManagerBuilder {
    app_name: String,
    sinks: Vec<Arc<dyn Sink>>,
    buffer_capacity: usize,
    dispatch: Dispatch,
}

impl LogManagerBuilder {
    /// Start a builder with defaults: direct dispatch, default capacity,
    /// no sinks
    pub fn new() -> Self {
        Self {
            app_name: "vitals".into(),
            sinks: Vec::new(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            dispatch: Dispatch::Direct,
        }
    }

    /// Set the application name stamped on diagnostics
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Append a sink
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Set the record queue capacity
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Dispatch sink writes through a worker pool of `size` threads
    ///
    /// A size of zero selects [`DEFAULT_POOL_SIZE`].
    pub fn worker_pool(mut self, size: usize) -> Self {
        let size = if size == 0 { DEFAULT_POOL_SIZE } else { size };
        self.dispatch = Dispatch::Pool { size };
        self
    }

    /// Build the manager
    ///
    /// A builder with no sinks gets a default [`ConsoleSink`] so the
    /// pipeline always has somewhere to write.
    pub fn build(mut self) -> LogManager {
        if self.sinks.is_empty() {
            self.sinks.push(Arc::new(ConsoleSink::new()));
        }

        LogManager::new(
            self.app_name,
            self.sinks,
            self.buffer_capacity,
            self.dispatch,
        )
    }
}

impl Default for LogManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use vitals_sinks::NullSink;

    use super::*;

    #[test]
    fn defaults() {
        let manager = LogManagerBuilder::new().build();

        assert_eq!(manager.app_name(), "vitals");
        assert_eq!(manager.buffer_capacity(), DEFAULT_BUFFER_CAPACITY);
        assert_eq!(manager.dispatch(), Dispatch::Direct);
        assert!(!manager.is_running());
    }

    #[test]
    fn empty_builder_gets_a_console_sink() {
        let manager = LogManagerBuilder::new().build();
        assert_eq!(manager.sink_count(), 1);
    }

    #[test]
    fn explicit_sinks_are_kept() {
        let manager = LogManagerBuilder::new()
            .sink(Arc::new(NullSink::new()))
            .sink(Arc::new(NullSink::new()))
            .build();
        assert_eq!(manager.sink_count(), 2);
    }

    #[test]
    fn worker_pool_switches_dispatch() {
        let manager = LogManagerBuilder::new()
            .sink(Arc::new(NullSink::new()))
            .worker_pool(8)
            .build();
        assert_eq!(manager.dispatch(), Dispatch::Pool { size: 8 });

        let manager = LogManagerBuilder::new()
            .sink(Arc::new(NullSink::new()))
            .worker_pool(0)
            .build();
        assert_eq!(manager.dispatch(), Dispatch::Pool { size: DEFAULT_POOL_SIZE });
    }

    #[test]
    fn buffer_capacity_is_applied() {
        let manager = LogManagerBuilder::new()
            .sink(Arc::new(NullSink::new()))
            .buffer_capacity(7)
            .build();
        assert_eq!(manager.buffer_capacity(), 7);
    }
}
