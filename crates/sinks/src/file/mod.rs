//! File sink - append-mode plaintext log
//!
//! Writes one canonical record line per `write`, flushed immediately so a
//! crash loses at most the line being written. The writer sits behind a
//! mutex because pool mode delivers records from several worker threads at
//! once.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use vitals_protocol::Record;

use crate::{Sink, SinkError};

/// Append-mode plaintext file sink
#[derive(Debug)]
pub struct FileSink {
    name: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    records_written: AtomicU64,
}

impl FileSink {
    /// Open (or create) the log file at `path` in append mode
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::open(path.display().to_string(), e))?;

        tracing::debug!(path = %path.display(), "file sink opened");

        Ok(Self {
            name: "file".into(),
            path,
            writer: Mutex::new(BufWriter::new(file)),
            records_written: AtomicU64::new(0),
        })
    }

    /// Path of the backing log file
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written so far
    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, record: &Record) -> Result<(), SinkError> {
        // A poisoned lock means a peer thread panicked mid-write; the
        // buffered writer itself is still sound, so keep going.
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());

        writeln!(writer, "{}", record.text())?;
        writer.flush()?;

        self.records_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
