use serde::{Deserialize, Serialize};
use store::{TrackId, TrackInterval};

/// Two tracks whose time spans intersect, with the shared window.
///
/// `id1 < id2` always holds, so an unordered pair has exactly one
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapPair {
    pub id1: TrackId,
    pub id2: TrackId,
    pub overlap_start: f64,
    pub overlap_end: f64,
}

impl OverlapPair {
    /// Pair two intersecting intervals, ordering ids canonically.
    ///
    /// The caller is responsible for checking that the intervals intersect
    /// and carry different ids.
    pub fn from_intervals(a: &TrackInterval, b: &TrackInterval) -> Self {
        let (id1, id2) = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
        Self {
            id1,
            id2,
            overlap_start: a.start.max(b.start),
            overlap_end: a.end.min(b.end),
        }
    }

    /// Length of the shared window; zero when the tracks only touch.
    pub fn duration(&self) -> f64 {
        self.overlap_end - self.overlap_start
    }

    pub fn ids(&self) -> (TrackId, TrackId) {
        (self.id1, self.id2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_canonical_regardless_of_argument_order() {
        let a = TrackInterval::new(8, 0.0, 4.0);
        let b = TrackInterval::new(3, 2.0, 9.0);
        let ab = OverlapPair::from_intervals(&a, &b);
        let ba = OverlapPair::from_intervals(&b, &a);
        assert_eq!(ab, ba);
        assert_eq!(ab.ids(), (3, 8));
        assert_eq!(ab.overlap_start, 2.0);
        assert_eq!(ab.overlap_end, 4.0);
        assert_eq!(ab.duration(), 2.0);
    }

    #[test]
    fn touching_intervals_have_zero_length_window() {
        let pair = OverlapPair::from_intervals(
            &TrackInterval::new(1, 0.0, 5.0),
            &TrackInterval::new(2, 5.0, 6.0),
        );
        assert_eq!(pair.overlap_start, 5.0);
        assert_eq!(pair.overlap_end, 5.0);
        assert_eq!(pair.duration(), 0.0);
    }
}
