//! Track Store
//!
//! Tracks enter the pipeline here. Callers hand over parallel `x`/`y`/`t`
//! columns per track (or a long table of observations), we check them
//! against the schema and pack every sample into one flat arena. Downstream
//! stages only ever see borrowed slices into that arena.
//!
//! ## What we check
//!
//! - equal column lengths, at least one sample per track
//! - finite coordinates and timestamps
//! - non-decreasing timestamps (strictly increasing if configured)
//! - unique track ids
//!
//! Nothing is repaired. A single bad track rejects the whole batch with a
//! typed [`StoreError`], before any overlap or matching work starts.
//!
//! ## Example
//!
//! ```
//! use store::{RawTrack, StoreConfig, TrackStore};
//!
//! let tracks = vec![
//!     RawTrack::new(1, vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0]),
//!     RawTrack::new(2, vec![5.0], vec![5.0], vec![0.5]),
//! ];
//! let store = TrackStore::from_raw(tracks, &StoreConfig::default()).unwrap();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.total_points(), 3);
//! assert_eq!(store.get(1).unwrap().end, 1.0);
//! ```
use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod error;
mod types;
mod validate;

pub use crate::config::StoreConfig;
pub use crate::error::StoreError;
pub use crate::types::{Observation, RawTrack, Track, TrackId, TrackInterval, TrackPoint};

use crate::validate::validate_track;

/// Location of one track inside the point arena.
#[derive(Debug, Clone, Copy)]
struct TrackEntry {
    id: TrackId,
    offset: usize,
    len: usize,
    start: f64,
    end: f64,
}

/// Read-only, validated collection of tracks.
///
/// Tracks keep the order in which they were supplied. Lookup by id is
/// `O(1)`.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    points: Vec<TrackPoint>,
    entries: Vec<TrackEntry>,
    index: HashMap<TrackId, usize>,
}

impl TrackStore {
    /// Build a store from column-shaped tracks.
    pub fn from_raw(tracks: Vec<RawTrack>, cfg: &StoreConfig) -> Result<Self, StoreError> {
        let start = Instant::now();
        cfg.validate()?;

        let span = tracing::span!(Level::INFO, "store.build", tracks = tracks.len());
        let _guard = span.enter();

        match Self::build(tracks, cfg) {
            Ok(store) => {
                info!(
                    tracks = store.len(),
                    points = store.total_points(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "store_built"
                );
                Ok(store)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "store_rejected"
                );
                Err(err)
            }
        }
    }

    /// Build a store from a long table of observations.
    ///
    /// Rows are grouped by `track_id`. Tracks appear in order of first
    /// occurrence and samples keep their row order, so the rows of each
    /// track must already be sorted by `t`.
    pub fn from_observations(rows: &[Observation], cfg: &StoreConfig) -> Result<Self, StoreError> {
        let mut slots: HashMap<TrackId, usize> = HashMap::new();
        let mut tracks: Vec<RawTrack> = Vec::new();
        for row in rows {
            let slot = *slots.entry(row.track_id).or_insert_with(|| {
                tracks.push(RawTrack {
                    id: row.track_id,
                    ..Default::default()
                });
                tracks.len() - 1
            });
            let track = &mut tracks[slot];
            track.x.push(row.x);
            track.y.push(row.y);
            track.t.push(row.t);
        }
        Self::from_raw(tracks, cfg)
    }

    fn build(tracks: Vec<RawTrack>, cfg: &StoreConfig) -> Result<Self, StoreError> {
        let total: usize = tracks.iter().map(|t| t.t.len()).sum();
        let mut store = TrackStore {
            points: Vec::with_capacity(total),
            entries: Vec::with_capacity(tracks.len()),
            index: HashMap::with_capacity(tracks.len()),
        };

        for raw in tracks {
            validate_track(&raw, cfg)?;
            if store.index.contains_key(&raw.id) {
                return Err(StoreError::DuplicateTrackId { track_id: raw.id });
            }

            let offset = store.points.len();
            store.points.extend(
                raw.x
                    .iter()
                    .zip(&raw.y)
                    .zip(&raw.t)
                    .map(|((&x, &y), &t)| TrackPoint { x, y, t }),
            );
            let len = raw.t.len();
            store.index.insert(raw.id, store.entries.len());
            store.entries.push(TrackEntry {
                id: raw.id,
                offset,
                len,
                start: raw.t[0],
                end: raw.t[len - 1],
            });
        }

        Ok(store)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of samples across all tracks.
    pub fn total_points(&self) -> usize {
        self.points.len()
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: TrackId) -> Option<Track<'_>> {
        self.index.get(&id).map(|&slot| self.view(&self.entries[slot]))
    }

    /// Points of one track, if present.
    pub fn points(&self, id: TrackId) -> Option<&[TrackPoint]> {
        self.get(id).map(|track| track.points)
    }

    /// Tracks in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Track<'_>> + '_ {
        self.entries.iter().map(move |entry| self.view(entry))
    }

    /// Track ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = TrackId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// `(id, start, end)` projection consumed by overlap detection.
    pub fn intervals(&self) -> Vec<TrackInterval> {
        self.entries
            .iter()
            .map(|e| TrackInterval::new(e.id, e.start, e.end))
            .collect()
    }

    /// Earliest start and latest end over all tracks.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        self.entries.iter().fold(None, |acc, e| match acc {
            None => Some((e.start, e.end)),
            Some((lo, hi)) => Some((lo.min(e.start), hi.max(e.end))),
        })
    }

    fn view(&self, entry: &TrackEntry) -> Track<'_> {
        Track {
            id: entry.id,
            points: &self.points[entry.offset..entry.offset + entry.len],
            start: entry.start,
            end: entry.end,
        }
    }
}
