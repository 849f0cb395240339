use serde::{Deserialize, Serialize};
use store::{TrackId, TrackPoint};
use thiserror::Error;

/// One unit of matching work: two tracks and the window they share.
///
/// The point slices are borrowed from the track store; a row never owns
/// sample data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRow<'a> {
    pub id1: TrackId,
    pub id2: TrackId,
    pub seq1: &'a [TrackPoint],
    pub seq2: &'a [TrackPoint],
    pub overlap_start: f64,
    pub overlap_end: f64,
}

impl<'a> MatchRow<'a> {
    pub fn new(
        (id1, seq1): (TrackId, &'a [TrackPoint]),
        (id2, seq2): (TrackId, &'a [TrackPoint]),
        overlap_start: f64,
        overlap_end: f64,
    ) -> Self {
        Self {
            id1,
            id2,
            seq1,
            seq2,
            overlap_start,
            overlap_end,
        }
    }
}

/// Successful outcome of matching one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Mean per-point distance.
    pub avg_distance: f64,
    /// Number of per-point distances that went into the mean.
    pub matched_points: usize,
    /// Track whose samples drove the scan; `None` when both directions ran.
    pub driver_id: Option<TrackId>,
}

/// Why a row produced no distance. Row-local; siblings are unaffected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Unmatched {
    #[error("track {track_id} has no samples in [{start}, {end}]")]
    EmptyWindow {
        track_id: TrackId,
        start: f64,
        end: f64,
    },

    #[error("invalid overlap window [{start}, {end}]")]
    InvalidWindow { start: f64, end: f64 },
}
