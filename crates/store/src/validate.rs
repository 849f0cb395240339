//! Per-track schema checks.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::types::RawTrack;

/// Check one track's columns against the schema and the store policy.
pub(crate) fn validate_track(raw: &RawTrack, cfg: &StoreConfig) -> Result<(), StoreError> {
    let track_id = raw.id;
    let (x_len, y_len, t_len) = (raw.x.len(), raw.y.len(), raw.t.len());
    if x_len != t_len || y_len != t_len {
        return Err(StoreError::ColumnLengthMismatch {
            track_id,
            x_len,
            y_len,
            t_len,
        });
    }
    if t_len == 0 {
        return Err(StoreError::EmptyTrack { track_id });
    }
    if let Some(max) = cfg.max_points_per_track {
        if t_len > max {
            return Err(StoreError::TrackTooLong {
                track_id,
                len: t_len,
                max,
            });
        }
    }

    for (column, values) in [("x", &raw.x), ("y", &raw.y), ("t", &raw.t)] {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(StoreError::NonFiniteValue {
                track_id,
                column,
                index,
            });
        }
    }

    for (i, pair) in raw.t.windows(2).enumerate() {
        let index = i + 1;
        if pair[1] < pair[0] {
            return Err(StoreError::UnsortedTimestamps { track_id, index });
        }
        if cfg.reject_duplicate_timestamps && pair[1] == pair[0] {
            return Err(StoreError::DuplicateTimestamp { track_id, index });
        }
    }

    Ok(())
}
