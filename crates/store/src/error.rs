//! Schema errors raised while building a track store.
//!
//! Every variant is fatal for the whole batch: the store is either built
//! from fully valid input or not built at all.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`ColumnLengthMismatch`](StoreError::ColumnLengthMismatch) | `x`, `y`, `t` differ in length |
//! | [`EmptyTrack`](StoreError::EmptyTrack) | a track has no samples |
//! | [`NonFiniteValue`](StoreError::NonFiniteValue) | NaN or infinity in any column |
//! | [`UnsortedTimestamps`](StoreError::UnsortedTimestamps) | `t` decreases |
//! | [`DuplicateTimestamp`](StoreError::DuplicateTimestamp) | `t` repeats under a strict policy |
//! | [`DuplicateTrackId`](StoreError::DuplicateTrackId) | an id appears twice |
//! | [`TrackTooLong`](StoreError::TrackTooLong) | the per-track limit is exceeded |
use thiserror::Error;

use crate::types::TrackId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("invalid store config: {0}")]
    InvalidConfig(String),

    #[error("track {track_id}: column lengths differ (x={x_len}, y={y_len}, t={t_len})")]
    ColumnLengthMismatch {
        track_id: TrackId,
        x_len: usize,
        y_len: usize,
        t_len: usize,
    },

    #[error("track {track_id} has no points")]
    EmptyTrack { track_id: TrackId },

    #[error("track {track_id}: non-finite {column} at index {index}")]
    NonFiniteValue {
        track_id: TrackId,
        column: &'static str,
        index: usize,
    },

    #[error("track {track_id}: timestamps decrease at index {index}")]
    UnsortedTimestamps { track_id: TrackId, index: usize },

    #[error("track {track_id}: repeated timestamp at index {index}")]
    DuplicateTimestamp { track_id: TrackId, index: usize },

    #[error("duplicate track id {track_id}")]
    DuplicateTrackId { track_id: TrackId },

    #[error("track {track_id} has {len} points, limit is {max}")]
    TrackTooLong {
        track_id: TrackId,
        len: usize,
        max: usize,
    },
}

impl StoreError {
    /// Track the error refers to, if any.
    pub fn track_id(&self) -> Option<TrackId> {
        match self {
            StoreError::InvalidConfig(_) => None,
            StoreError::ColumnLengthMismatch { track_id, .. }
            | StoreError::EmptyTrack { track_id }
            | StoreError::NonFiniteValue { track_id, .. }
            | StoreError::UnsortedTimestamps { track_id, .. }
            | StoreError::DuplicateTimestamp { track_id, .. }
            | StoreError::DuplicateTrackId { track_id }
            | StoreError::TrackTooLong { track_id, .. } => Some(*track_id),
        }
    }
}
