use store::TrackPoint;

/// Distance from `p` to the segment `a`–`b` in (x, y).
pub(crate) fn point_to_segment(p: &TrackPoint, a: &TrackPoint, b: &TrackPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    // Projection parameter clamped onto the segment.
    let u = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let cx = a.x + u * dx;
    let cy = a.y + u * dy;
    (p.x - cx).hypot(p.y - cy)
}

/// Sum of distances from each driver sample to the nearest point on the
/// curve through `other`. A one-sample curve is a single point. `None` if
/// `other` is empty.
pub(crate) fn polyline_sum(driver: &[TrackPoint], other: &[TrackPoint]) -> Option<f64> {
    match other {
        [] => None,
        [only] => Some(driver.iter().map(|p| p.distance_to(only)).sum()),
        _ => Some(
            driver
                .iter()
                .map(|p| {
                    other
                        .windows(2)
                        .map(|seg| point_to_segment(p, &seg[0], &seg[1]))
                        .fold(f64::INFINITY, f64::min)
                })
                .sum(),
        ),
    }
}
