//! # Trajectory Matcher (`matcher`)
//!
//! Scores how closely two tracks run together while they both exist. One
//! [`MatchRow`] holds two time-sorted point sequences and their shared
//! window; the result is the mean spatial distance between aligned samples.
//!
//! ## Pipeline per row
//!
//! 1. **Windowing**: each sequence is cut down to samples with `t` inside
//!    `[overlap_start, overlap_end]` (inclusive, zero-copy). If either side
//!    ends up empty the row is [`Unmatched`].
//! 2. **Alignment**: every sample of the driving track is paired with a
//!    counterpart on the other track, as chosen by [`MatchPolicy`].
//! 3. **Distance**: Euclidean in (x, y); time only drives alignment.
//! 4. **Aggregation**: arithmetic mean of the per-sample distances.
//!
//! The driving track is the one with fewer samples overall, ties going to
//! the smaller id. [`MatchDirection::Symmetric`] runs both directions and
//! pools the distances.
//!
//! Every function here is pure; rows can be evaluated in any order and on
//! any thread.
//!
//! ## Example
//!
//! ```
//! use matcher::{match_row, MatchConfig, MatchRow};
//! use store::TrackPoint;
//!
//! let a = [TrackPoint::new(0.0, 0.0, 0.0), TrackPoint::new(1.0, 0.0, 1.0)];
//! let b = [TrackPoint::new(0.0, 1.0, 0.0), TrackPoint::new(1.0, 1.0, 1.0)];
//! let row = MatchRow::new((1, &a), (2, &b), 0.0, 1.0);
//!
//! assert_eq!(match_row(&row, &MatchConfig::default()), Some(1.0));
//! ```
use store::{TrackId, TrackPoint};
use tracing::trace;

mod align;
pub mod config;
mod polyline;
pub mod types;
mod window;

pub use crate::config::{MatchConfig, MatchConfigError, MatchDirection, MatchPolicy};
pub use crate::types::{MatchRow, MatchSummary, Unmatched};
pub use crate::window::restrict;

use crate::align::nearest_timestamp_sum;
use crate::polyline::polyline_sum;

/// Mean aligned distance for one row, or `None` if the row cannot be matched.
pub fn match_row(row: &MatchRow<'_>, cfg: &MatchConfig) -> Option<f64> {
    match_row_detailed(row, cfg)
        .ok()
        .map(|summary| summary.avg_distance)
}

/// Like [`match_row`], but reports why a row was unmatched and how many
/// samples contributed to the mean.
pub fn match_row_detailed(row: &MatchRow<'_>, cfg: &MatchConfig) -> Result<MatchSummary, Unmatched> {
    let result = evaluate(row, cfg);
    if let Err(reason) = &result {
        trace!(id1 = row.id1, id2 = row.id2, reason = %reason, "row_unmatched");
    }
    result
}

fn evaluate(row: &MatchRow<'_>, cfg: &MatchConfig) -> Result<MatchSummary, Unmatched> {
    let (start, end) = (row.overlap_start, row.overlap_end);
    // Also catches NaN bounds.
    if !(start <= end) {
        return Err(Unmatched::InvalidWindow { start, end });
    }

    let w1 = restrict(row.seq1, start, end);
    if w1.is_empty() {
        return Err(Unmatched::EmptyWindow {
            track_id: row.id1,
            start,
            end,
        });
    }
    let w2 = restrict(row.seq2, start, end);
    if w2.is_empty() {
        return Err(Unmatched::EmptyWindow {
            track_id: row.id2,
            start,
            end,
        });
    }

    let first_drives = row.seq1.len() < row.seq2.len()
        || (row.seq1.len() == row.seq2.len() && row.id1 <= row.id2);

    let (total, matched_points, driver_id) = match cfg.direction {
        MatchDirection::Driver => {
            let (driver_id, driver, other) = if first_drives {
                (row.id1, w1, w2)
            } else {
                (row.id2, w2, w1)
            };
            let total = aligned_sum(cfg.policy, driver, other, driver_id, start, end)?;
            (total, driver.len(), Some(driver_id))
        }
        MatchDirection::Symmetric => {
            let forward = aligned_sum(cfg.policy, w1, w2, row.id1, start, end)?;
            let backward = aligned_sum(cfg.policy, w2, w1, row.id2, start, end)?;
            (forward + backward, w1.len() + w2.len(), None)
        }
    };

    Ok(MatchSummary {
        avg_distance: total / matched_points as f64,
        matched_points,
        driver_id,
    })
}

fn aligned_sum(
    policy: MatchPolicy,
    driver: &[TrackPoint],
    other: &[TrackPoint],
    driver_id: TrackId,
    start: f64,
    end: f64,
) -> Result<f64, Unmatched> {
    let sum = match policy {
        MatchPolicy::NearestTimestamp => nearest_timestamp_sum(driver, other),
        MatchPolicy::Polyline => polyline_sum(driver, other),
    };
    sum.ok_or(Unmatched::EmptyWindow {
        track_id: driver_id,
        start,
        end,
    })
}
