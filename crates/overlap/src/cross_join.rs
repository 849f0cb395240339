use store::TrackInterval;

use crate::types::OverlapPair;

/// Evaluate the intersection predicate over every unordered pair.
pub(crate) fn cross_join(intervals: &[TrackInterval]) -> Vec<OverlapPair> {
    let mut pairs = Vec::new();
    for (i, a) in intervals.iter().enumerate() {
        for b in &intervals[i + 1..] {
            if a.intersects(b) {
                pairs.push(OverlapPair::from_intervals(a, b));
            }
        }
    }
    pairs.sort_unstable_by(|a, b| a.ids().cmp(&b.ids()));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_tracks_produce_nothing() {
        let pairs = cross_join(&[
            TrackInterval::new(1, 10.0, 20.0),
            TrackInterval::new(2, 0.0, 5.0),
        ]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn single_pair_window() {
        let pairs = cross_join(&[
            TrackInterval::new(2, 0.0, 2.5),
            TrackInterval::new(1, 0.0, 2.0),
        ]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ids(), (1, 2));
        assert_eq!(pairs[0].overlap_start, 0.0);
        assert_eq!(pairs[0].overlap_end, 2.0);
    }
}
