//! Console sink - severity-colored stdout output
//!
//! Writes each record's canonical text to stdout, styled by severity.
//! Not intended for high-throughput production use.
//!
//! # Example Output
//!
//! ```text
//! [2026-08-02 14:31:06] [CPU] [vitals] [INFO] Payload value is: 12%
//! [2026-08-02 14:31:07] [CPU] [vitals] [CRITICAL] Payload value is: 95%
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use owo_colors::{OwoColorize, Style};
use vitals_protocol::{Record, Severity};

use crate::{Sink, SinkError};

/// Stdout sink with optional severity coloring
pub struct ConsoleSink {
    name: String,
    color: bool,
    records_written: AtomicU64,
}

/// Pick a style for a severity level
fn severity_style(severity: Severity, enabled: bool) -> Style {
    if !enabled {
        return Style::new();
    }
    match severity {
        Severity::Info => Style::new(),
        Severity::Warn => Style::new().yellow(),
        Severity::Critical => Style::new().red(),
    }
}

impl ConsoleSink {
    /// Create a console sink with colors enabled
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Create a console sink with colors disabled (for piped output)
    pub fn no_color() -> Self {
        Self::with_color(false)
    }

    fn with_color(color: bool) -> Self {
        Self {
            name: "console".into(),
            color,
            records_written: AtomicU64::new(0),
        }
    }

    /// Number of records written so far
    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &Record) -> Result<(), SinkError> {
        let style = severity_style(record.severity(), self.color);

        // One locked write per record keeps concurrent lines whole.
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", record.text().style(style))?;

        self.records_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
