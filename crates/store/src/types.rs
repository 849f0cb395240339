//! Core data model types for the track store.
//!
//! ```text
//! RawTrack (columns)            Observation (long rows)
//! ├── id: TrackId               ├── track_id
//! ├── x: Vec<f64>               ├── x, y
//! ├── y: Vec<f64>               └── t
//! └── t: Vec<f64>                      │ grouped by track_id
//!         │                            ▼
//!         └──────────► TrackStore ◄────┘
//!                       │
//!                       ├── Track<'_>       borrowed view (id, points, start, end)
//!                       └── TrackInterval   (id, start, end) projection
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a track; unique within one store.
pub type TrackId = i64;

/// A single time-stamped sample in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl TrackPoint {
    pub const fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Euclidean distance in (x, y). Timestamps are ignored.
    #[inline]
    pub fn distance_to(&self, other: &TrackPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Column-shaped input for one track: parallel `x`, `y`, `t` sequences.
///
/// This is the shape callers hand to [`TrackStore::from_raw`](crate::TrackStore::from_raw).
/// Nothing is checked until the store is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTrack {
    pub id: TrackId,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub t: Vec<f64>,
}

impl RawTrack {
    pub fn new(id: TrackId, x: Vec<f64>, y: Vec<f64>, t: Vec<f64>) -> Self {
        Self { id, x, y, t }
    }

    /// Split a point sequence into columns.
    pub fn from_points<I>(id: TrackId, points: I) -> Self
    where
        I: IntoIterator<Item = TrackPoint>,
    {
        let points = points.into_iter();
        let (lower, _) = points.size_hint();
        let mut raw = Self {
            id,
            x: Vec::with_capacity(lower),
            y: Vec::with_capacity(lower),
            t: Vec::with_capacity(lower),
        };
        for p in points {
            raw.x.push(p.x);
            raw.y.push(p.y);
            raw.t.push(p.t);
        }
        raw
    }

    /// Length of the timestamp column.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// One row of a long-format observation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub track_id: TrackId,
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl Observation {
    pub const fn new(track_id: TrackId, x: f64, y: f64, t: f64) -> Self {
        Self { track_id, x, y, t }
    }
}

/// Borrowed view of a validated track.
///
/// `points` is never empty and is sorted by `t`; `start` and `end` are the
/// first and last timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track<'a> {
    pub id: TrackId,
    pub points: &'a [TrackPoint],
    pub start: f64,
    pub end: f64,
}

impl<'a> Track<'a> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn interval(&self) -> TrackInterval {
        TrackInterval {
            id: self.id,
            start: self.start,
            end: self.end,
        }
    }
}

/// The `(id, start, end)` projection of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackInterval {
    pub id: TrackId,
    pub start: f64,
    pub end: f64,
}

impl TrackInterval {
    pub const fn new(id: TrackId, start: f64, end: f64) -> Self {
        Self { id, start, end }
    }

    /// Closed-interval intersection test; touching endpoints count.
    #[inline]
    pub fn intersects(&self, other: &TrackInterval) -> bool {
        self.end >= other.start && self.start <= other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ignores_time() {
        let a = TrackPoint::new(0.0, 0.0, 0.0);
        let b = TrackPoint::new(3.0, 4.0, 100.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn raw_track_from_points_splits_columns() {
        let raw = RawTrack::from_points(
            7,
            vec![TrackPoint::new(1.0, 2.0, 0.0), TrackPoint::new(3.0, 4.0, 1.0)],
        );
        assert_eq!(raw.id, 7);
        assert_eq!(raw.x, vec![1.0, 3.0]);
        assert_eq!(raw.y, vec![2.0, 4.0]);
        assert_eq!(raw.t, vec![0.0, 1.0]);
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn intervals_touching_at_boundary_intersect() {
        let a = TrackInterval::new(1, 0.0, 5.0);
        let b = TrackInterval::new(2, 5.0, 9.0);
        let c = TrackInterval::new(3, 5.5, 9.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn observation_serde_roundtrip() {
        let obs = Observation::new(3, 1.5, -2.0, 10.25);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }
}
