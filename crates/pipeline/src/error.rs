//! Pipeline error types

use thiserror::Error;

/// Errors from pipeline operations
///
/// Producer-facing operations (`log`) report their outcome as a boolean and
/// never surface these; the typed errors exist for the worker pool, whose
/// misuse is a programming error that should fail fast.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Task submitted to a pool that has been stopped
    #[error("worker pool is stopped")]
    PoolStopped,

    /// Task panicked while running on the pool
    #[error("pool task panicked: {0}")]
    TaskPanicked(String),

    /// Task handle outlived its task without receiving a result
    #[error("pool task was canceled before completion")]
    TaskCanceled,
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert!(
            PipelineError::PoolStopped
                .to_string()
                .contains("pool is stopped")
        );
        assert!(
            PipelineError::TaskPanicked("boom".into())
                .to_string()
                .contains("boom")
        );
        assert!(
            PipelineError::TaskCanceled
                .to_string()
                .contains("canceled")
        );
    }
}
