//! Overlap Detector
//!
//! Finds every pair of tracks whose time spans intersect. Intervals are
//! closed: two tracks that merely touch (`end1 == start2`) overlap at that
//! instant, and a single-sample track (`start == end`) can overlap others.
//!
//! ## Contract
//!
//! - Input is the `(id, start, end)` projection of a track batch.
//! - Output holds exactly one [`OverlapPair`] per intersecting unordered
//!   pair, with `id1 < id2`, `overlap_start = max(start1, start2)` and
//!   `overlap_end = min(end1, end2)`.
//! - Output is sorted by `(id1, id2)` whichever strategy produced it.
//! - Bad input (duplicate ids, non-finite or inverted bounds) aborts the
//!   whole call.
//!
//! ## Example
//!
//! ```
//! use overlap::{detect_overlaps, OverlapConfig};
//! use store::TrackInterval;
//!
//! let intervals = vec![
//!     TrackInterval::new(1, 0.0, 2.0),
//!     TrackInterval::new(2, 0.0, 2.5),
//!     TrackInterval::new(3, 10.0, 20.0),
//! ];
//! let pairs = detect_overlaps(&intervals, &OverlapConfig::default()).unwrap();
//!
//! assert_eq!(pairs.len(), 1);
//! assert_eq!((pairs[0].id1, pairs[0].id2), (1, 2));
//! assert_eq!(pairs[0].overlap_end, 2.0);
//! ```
use std::collections::HashSet;
use std::time::Instant;

use store::{TrackInterval, TrackStore};
use tracing::{info, warn, Level};

mod config;
mod cross_join;
mod sweep;
mod types;

pub use crate::config::{OverlapConfig, OverlapError, OverlapStrategy};
pub use crate::types::OverlapPair;

use crate::cross_join::cross_join;
use crate::sweep::sweep_line;

/// Enumerate all intersecting pairs among `intervals`.
pub fn detect_overlaps(
    intervals: &[TrackInterval],
    cfg: &OverlapConfig,
) -> Result<Vec<OverlapPair>, OverlapError> {
    let start = Instant::now();
    cfg.validate()?;

    let span = tracing::span!(
        Level::INFO,
        "overlap.detect",
        tracks = intervals.len(),
        strategy = ?cfg.strategy
    );
    let _guard = span.enter();

    if let Err(err) = check_intervals(intervals) {
        warn!(
            error = %err,
            elapsed_micros = start.elapsed().as_micros(),
            "overlap_rejected"
        );
        return Err(err);
    }

    let pairs = match cfg.strategy {
        OverlapStrategy::SweepLine => sweep_line(intervals),
        OverlapStrategy::CrossJoin => cross_join(intervals),
    };

    info!(
        pairs = pairs.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "overlap_detected"
    );
    Ok(pairs)
}

/// Run detection over every track in a validated store.
pub fn detect_store_overlaps(
    store: &TrackStore,
    cfg: &OverlapConfig,
) -> Result<Vec<OverlapPair>, OverlapError> {
    detect_overlaps(&store.intervals(), cfg)
}

fn check_intervals(intervals: &[TrackInterval]) -> Result<(), OverlapError> {
    let mut seen = HashSet::with_capacity(intervals.len());
    for iv in intervals {
        if !iv.start.is_finite() || !iv.end.is_finite() || iv.start > iv.end {
            return Err(OverlapError::InvalidInterval {
                id: iv.id,
                start: iv.start,
                end: iv.end,
            });
        }
        if !seen.insert(iv.id) {
            return Err(OverlapError::DuplicateTrackId { id: iv.id });
        }
    }
    Ok(())
}
