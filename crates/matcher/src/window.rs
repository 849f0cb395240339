use store::TrackPoint;

/// Samples with `t` in `[start, end]`, as a sub-slice.
///
/// `points` must be sorted by `t`. Two binary searches, no copying. An
/// inverted window yields an empty slice.
pub fn restrict(points: &[TrackPoint], start: f64, end: f64) -> &[TrackPoint] {
    let lo = points.partition_point(|p| p.t < start);
    let hi = points.partition_point(|p| p.t <= end);
    if lo < hi {
        &points[lo..hi]
    } else {
        &[]
    }
}
