//! Workspace umbrella crate for track overlap detection and trajectory
//! matching.
//!
//! The stages live in their own crates and are re-exported here:
//!
//! | Stage | Crate | Entry point |
//! |-------|-------|-------------|
//! | Track store | `store` | [`TrackStore::from_raw`], [`TrackStore::from_observations`] |
//! | Overlap detector | `overlap` | [`detect_overlaps`] |
//! | Pair materializer | this crate | [`materialize`] |
//! | Trajectory matcher | `matcher` | [`match_row`] |
//! | Batch executor | this crate | [`match_pairs`], [`BatchExecutor`] |
//!
//! [`process_tracks`] chains all of them and returns a [`PairTable`].
//!
//! ```
//! use trackmatch::{process_tracks, RawTrack, StoreConfig, TrackStore, TrackmatchConfig};
//!
//! let store = TrackStore::from_raw(
//!     vec![
//!         RawTrack::new(1, vec![0.0, 1.0], vec![0.0, 0.0], vec![0.0, 1.0]),
//!         RawTrack::new(2, vec![0.0, 1.0], vec![2.0, 2.0], vec![0.0, 1.0]),
//!         RawTrack::new(3, vec![9.0], vec![9.0], vec![50.0]),
//!     ],
//!     &StoreConfig::default(),
//! )?;
//!
//! let table = process_tracks(&store, &TrackmatchConfig::default())?;
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.avg_distance, vec![Some(2.0)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod error;
pub mod executor;
mod materialize;
pub mod metrics;

pub use matcher::{
    MatchConfig, MatchConfigError, MatchDirection, MatchPolicy, MatchRow, MatchSummary, Unmatched,
    match_row, match_row_detailed, restrict,
};
pub use overlap::{OverlapConfig, OverlapError, OverlapPair, OverlapStrategy};
pub use store::{
    Observation, RawTrack, StoreConfig, StoreError, Track, TrackId, TrackInterval, TrackPoint,
    TrackStore,
};

pub use crate::config::{ConfigLoadError, TrackmatchConfig};
pub use crate::error::PipelineError;
pub use crate::executor::{BatchExecutor, CancelFlag, ExecutorConfig};
pub use crate::materialize::materialize;
pub use crate::metrics::{PipelineMetrics, set_pipeline_metrics};

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{Level, info};

use crate::metrics::metrics_recorder;

/// All pairs of tracks in `store` whose time spans intersect, sorted by
/// `(id1, id2)`.
pub fn detect_overlaps(
    store: &TrackStore,
    cfg: &OverlapConfig,
) -> Result<Vec<OverlapPair>, PipelineError> {
    let start = Instant::now();
    let pairs = overlap::detect_store_overlaps(store, cfg)?;
    if let Some(recorder) = metrics_recorder() {
        recorder.record_overlaps(start.elapsed(), store.len(), pairs.len());
    }
    Ok(pairs)
}

/// Mean aligned distance for every row, in row order, using the default
/// executor settings.
pub fn match_pairs(
    rows: &[MatchRow<'_>],
    cfg: &MatchConfig,
) -> Result<Vec<Option<f64>>, PipelineError> {
    BatchExecutor::new(cfg.clone(), ExecutorConfig::default())?.match_pairs(rows)
}

/// Overlap pairs with their aligned distance column.
///
/// `avg_distance[i]` belongs to `pairs[i]`; `None` marks an unmatched row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairTable {
    pub pairs: Vec<OverlapPair>,
    pub avg_distance: Vec<Option<f64>>,
}

impl PairTable {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.avg_distance.iter().filter(|d| d.is_some()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.len() - self.matched_count()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&OverlapPair, Option<f64>)> + '_ {
        self.pairs.iter().zip(self.avg_distance.iter().copied())
    }

    /// Distance for the unordered pair `{a, b}`. The outer `None` means the
    /// tracks do not overlap.
    pub fn get(&self, a: TrackId, b: TrackId) -> Option<Option<f64>> {
        let key = (a.min(b), a.max(b));
        self.pairs
            .binary_search_by(|p| p.ids().cmp(&key))
            .ok()
            .map(|idx| self.avg_distance[idx])
    }

    /// Matched pairs, closest first. Ties keep `(id1, id2)` order.
    pub fn ranked(&self) -> Vec<(OverlapPair, f64)> {
        let mut ranked: Vec<(OverlapPair, f64)> = self
            .iter()
            .filter_map(|(pair, d)| d.map(|d| (*pair, d)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }
}

/// Detect overlaps in `store`, materialize them and match every row.
pub fn process_tracks(
    store: &TrackStore,
    cfg: &TrackmatchConfig,
) -> Result<PairTable, PipelineError> {
    let start = Instant::now();
    let executor = cfg.executor()?;

    let span = tracing::span!(Level::INFO, "pipeline.process_tracks", tracks = store.len());
    let _guard = span.enter();

    let pairs = detect_overlaps(store, &cfg.overlap)?;
    let rows = materialize(store, &pairs)?;
    let avg_distance = executor.match_pairs(&rows)?;

    let table = PairTable {
        pairs,
        avg_distance,
    };
    info!(
        pairs = table.len(),
        unmatched = table.unmatched_count(),
        elapsed_micros = start.elapsed().as_micros(),
        "pipeline_success"
    );
    Ok(table)
}

/// [`process_tracks`] over column-shaped input, validated with the `store`
/// section of `cfg`.
pub fn process_raw_tracks(
    tracks: Vec<RawTrack>,
    cfg: &TrackmatchConfig,
) -> Result<PairTable, PipelineError> {
    let store = TrackStore::from_raw(tracks, &cfg.store)?;
    process_tracks(&store, cfg)
}
