//! File-backed telemetry source
//!
//! Reads a file whose first line holds the current gauge value (the
//! `/proc`-style pattern: the producer rewrites the file, the consumer
//! re-reads it). Every poll seeks back to the start, so the source always
//! reports the latest value.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::Source;

/// Telemetry source over a single-value file
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Option<File>,
}

impl FileSource {
    /// Create a source for `path`; nothing is opened until [`Source::open`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Path this source reads from
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn open(&mut self) -> bool {
        match File::open(&self.path) {
            Ok(file) => {
                self.file = Some(file);
                true
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to open telemetry file"
                );
                false
            }
        }
    }

    fn read(&mut self, out: &mut String) -> bool {
        let Some(file) = self.file.as_mut() else {
            return false;
        };

        if let Err(error) = file.seek(SeekFrom::Start(0)) {
            tracing::warn!(path = %self.path.display(), %error, "seek failed");
            return false;
        }

        let mut line = String::new();
        match BufReader::new(&mut *file).read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => {
                // Strip the line ending; the classifier trims nothing.
                out.push_str(line.trim_end_matches(['\r', '\n']));
                true
            }
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "read failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;
