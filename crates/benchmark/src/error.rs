//! Benchmark error type.

use thiserror::Error;

/// Errors that can occur while generating grids or running benchmarks.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Partition error: {0}")]
    Partition(#[from] gridpart_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Coverage check failed for {case}: {reason}")]
    Coverage { case: String, reason: String },
}
