//! Vitals Sinks
//!
//! The [`Sink`] capability consumed by the pipeline core, plus the built-in
//! implementations:
//!
//! - [`ConsoleSink`] - severity-colored stdout output
//! - [`FileSink`] - append-mode plaintext log file
//! - [`NullSink`] - counting discard sink for tests and benchmarks
//!
//! Sinks are shared (`Arc<dyn Sink>`) between the drain thread and worker
//! pool tasks, so every implementation is internally synchronized. A sink
//! reports write failures as [`SinkError`] values; the drain loop swallows
//! them so one failing sink never affects its peers or any producer.

mod common;
pub mod console;
mod factory;
pub mod file;
pub mod null;

pub use common::SinkError;
pub use console::ConsoleSink;
pub use factory::{SinkSpec, create};
pub use file::FileSink;
pub use null::NullSink;

use vitals_protocol::Record;

/// A destination for records
///
/// Implementations may perform arbitrary I/O in [`write`](Sink::write) and
/// must be internally thread-safe: in pool mode the same sink is written to
/// concurrently from several worker threads.
pub trait Sink: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Deliver one record
    fn write(&self, record: &Record) -> Result<(), SinkError>;
}
