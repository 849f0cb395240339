use matcher::MatchConfigError;
use overlap::OverlapError;
use store::{StoreError, TrackId};
use thiserror::Error;

/// Errors that abort a pipeline call for the whole batch.
///
/// Row-level outcomes (an empty window, say) are never errors; they surface
/// as `None` in the distance column.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("track ingestion failed: {0}")]
    Store(#[from] StoreError),

    #[error("overlap detection failed: {0}")]
    Overlap(#[from] OverlapError),

    #[error("invalid match config: {0}")]
    MatchConfig(#[from] MatchConfigError),

    #[error("invalid executor config: {0}")]
    InvalidConfig(String),

    #[error("pair references unknown track {id}")]
    UnknownTrack { id: TrackId },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("match batch cancelled")]
    Cancelled,

    #[error("match batch exceeded its {timeout_ms} ms deadline")]
    DeadlineExceeded { timeout_ms: u64 },
}

impl PipelineError {
    /// `true` for errors raised by a cancel flag or deadline rather than by
    /// bad input.
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            PipelineError::Cancelled | PipelineError::DeadlineExceeded { .. }
        )
    }
}
