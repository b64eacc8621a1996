//! Common sink types

use std::io;

use thiserror::Error;

/// Errors a sink can report from construction or `write`
///
/// The pipeline core treats these as diagnostics, never as control flow: a
/// failed write is logged and the record is dropped for that sink only.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to open the sink's backing target
    #[error("failed to open sink target '{path}': {source}")]
    Open {
        /// Target path or address
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to write a record
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

impl SinkError {
    /// Create an Open error
    pub fn open(path: impl Into<String>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
