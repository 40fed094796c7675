use std::collections::TryReserveError;

use sum_kernels::KernelError;
use sum_primitives::TimingError;

/// Everything that can stop a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// An input buffer could not be allocated. Fatal: no retry, no partial report.
    #[error("Memory allocation failed for size {size}")]
    Allocation {
        size: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error("Failed to write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
