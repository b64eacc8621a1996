//! Vitals Pipeline
//!
//! The concurrency engine that connects telemetry producers to sinks.
//!
//! # Architecture
//!
//! ```text
//! [Samplers]                 [LogManager]                    [Sinks]
//!    CPU ────┐                                            ┌──→ console
//!    GPU ────┼──→ log() ──→ BlockingQueue ──→ drain ──────┼──→ file
//!    RAM ────┘    (try_push)                 thread   │   └──→ ...
//!                                                     └─ or WorkerPool
//!                                                        (one task per
//!                                                         record × sink)
//! ```
//!
//! # Key Design
//!
//! - **Bounded handoff**: a [`RingBuffer`] wrapped into a [`BlockingQueue`]
//!   (mutex + two condvars + stop flag) carries records from producers to
//!   the single drain thread
//! - **Non-blocking producers**: [`LogManager::log`] never waits; a full
//!   queue drops the record and reports `false`
//! - **Two dispatch modes**: the drain thread writes sinks inline
//!   ([`Dispatch::Direct`]) or fans each record out as per-sink
//!   [`WorkerPool`] tasks ([`Dispatch::Pool`])
//! - **Drain-on-shutdown**: `stop()` closes the queue, the drain loop
//!   empties it, the pool finishes every queued write, then all threads are
//!   joined
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vitals_pipeline::LogManagerBuilder;
//! use vitals_protocol::{Context, Record};
//! use vitals_sinks::NullSink;
//!
//! let manager = LogManagerBuilder::new()
//!     .app_name("demo")
//!     .sink(Arc::new(NullSink::new()))
//!     .buffer_capacity(16)
//!     .build();
//!
//! manager.start();
//! assert!(manager.log(Record::new("demo", Context::Cpu, 40)));
//! manager.stop();
//! ```

mod builder;
mod error;
mod manager;
mod metrics;
mod pool;
mod queue;
mod ring;

pub use builder::LogManagerBuilder;
pub use error::{PipelineError, Result};
pub use manager::{Dispatch, LogManager};
pub use metrics::{PipelineMetrics, PipelineSnapshot};
pub use pool::{TaskHandle, WorkerPool};
pub use queue::BlockingQueue;
pub use ring::RingBuffer;

/// Default record queue capacity
pub const DEFAULT_BUFFER_CAPACITY: usize = 128;

/// Default worker pool size for pool-mode dispatch
pub const DEFAULT_POOL_SIZE: usize = 4;
