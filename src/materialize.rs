//! Joins overlap pairs back to track samples.

use matcher::MatchRow;
use overlap::OverlapPair;
use store::TrackStore;

use crate::error::PipelineError;

/// Build one [`MatchRow`] per pair, in pair order.
///
/// Rows borrow their point slices from `store`. Every id referenced by
/// `pairs` must be present; a missing id fails the whole call.
pub fn materialize<'a>(
    store: &'a TrackStore,
    pairs: &[OverlapPair],
) -> Result<Vec<MatchRow<'a>>, PipelineError> {
    let lookup = |id| {
        store
            .points(id)
            .ok_or(PipelineError::UnknownTrack { id })
    };

    pairs
        .iter()
        .map(|pair| {
            Ok(MatchRow::new(
                (pair.id1, lookup(pair.id1)?),
                (pair.id2, lookup(pair.id2)?),
                pair.overlap_start,
                pair.overlap_end,
            ))
        })
        .collect()
}
