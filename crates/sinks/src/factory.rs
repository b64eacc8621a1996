//! Sink factory
//!
//! Maps opaque sink descriptors onto shared sink instances. The descriptor
//! enum keeps this crate independent of the configuration format; the
//! facade translates its config into [`SinkSpec`]s.

use std::path::PathBuf;
use std::sync::Arc;

use crate::{ConsoleSink, FileSink, NullSink, Sink, SinkError};

/// Descriptor for one sink to construct
#[derive(Debug, Clone)]
pub enum SinkSpec {
    /// Severity-colored stdout output
    Console {
        /// Enable ANSI colors
        color: bool,
    },
    /// Append-mode plaintext file
    File {
        /// Log file path
        path: PathBuf,
    },
    /// Counting discard sink
    Null,
}

/// Construct a shared sink from its descriptor
pub fn create(spec: &SinkSpec) -> Result<Arc<dyn Sink>, SinkError> {
    match spec {
        SinkSpec::Console { color: true } => Ok(Arc::new(ConsoleSink::new())),
        SinkSpec::Console { color: false } => Ok(Arc::new(ConsoleSink::no_color())),
        SinkSpec::File { path } => Ok(Arc::new(FileSink::new(path)?)),
        SinkSpec::Null => Ok(Arc::new(NullSink::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_console_sink() {
        let sink = create(&SinkSpec::Console { color: false }).unwrap();
        assert_eq!(sink.name(), "console");
    }

    #[test]
    fn creates_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let sink = create(&SinkSpec::File {
            path: dir.path().join("out.log"),
        })
        .unwrap();
        assert_eq!(sink.name(), "file");
    }

    #[test]
    fn creates_null_sink() {
        let sink = create(&SinkSpec::Null).unwrap();
        assert_eq!(sink.name(), "null");
    }

    #[test]
    fn file_sink_creation_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let spec = SinkSpec::File {
            path: dir.path().to_path_buf(),
        };
        assert!(create(&spec).is_err());
    }
}
