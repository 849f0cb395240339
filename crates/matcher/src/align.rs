//! Nearest-timestamp alignment by linear co-scan.
//!
//! Both sequences are sorted by `t`, so the candidate position in `other`
//! only ever moves forward. `after` is the
//! first sample with `t >= p.t`; `before` is the first sample of the last
//! timestamp group strictly earlier than `p.t`. The nearest sample is one
//! of those two, with ties resolved toward `before`.

use store::TrackPoint;

/// Sum of distances from each driver sample to its nearest-in-time sample
/// in `other`. `None` if `other` is empty.
pub(crate) fn nearest_timestamp_sum(driver: &[TrackPoint], other: &[TrackPoint]) -> Option<f64> {
    if other.is_empty() {
        return None;
    }

    let m = other.len();
    let mut after = 0;
    let mut before: Option<usize> = None;
    let mut total = 0.0;

    for p in driver {
        while after < m && other[after].t < p.t {
            if after == 0 || other[after].t != other[after - 1].t {
                before = Some(after);
            }
            after += 1;
        }

        let q = match before {
            Some(b) if after == m || p.t - other[b].t <= other[after].t - p.t => b,
            _ => after,
        };
        total += p.distance_to(&other[q]);
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn pt(x: f64, y: f64, t: f64) -> TrackPoint {
        TrackPoint::new(x, y, t)
    }

    /// Index of the earliest sample minimising `|q.t - t|`, by full scan.
    fn nearest_by_scan(other: &[TrackPoint], t: f64) -> usize {
        let mut best = 0;
        for (i, q) in other.iter().enumerate() {
            let d = (q.t - t).abs();
            let best_d = (other[best].t - t).abs();
            if d < best_d || (d == best_d && q.t < other[best].t) {
                best = i;
            }
        }
        best
    }

    #[test]
    fn empty_other_is_none() {
        assert!(nearest_timestamp_sum(&[pt(0.0, 0.0, 0.0)], &[]).is_none());
    }

    #[test]
    fn empty_driver_sums_to_zero() {
        assert_eq!(nearest_timestamp_sum(&[], &[pt(0.0, 0.0, 0.0)]), Some(0.0));
    }

    #[test]
    fn tie_goes_to_earlier_sample() {
        let other = [pt(0.0, 0.0, 0.0), pt(10.0, 0.0, 2.0)];
        let sum = nearest_timestamp_sum(&[pt(0.0, 3.0, 1.0)], &other).unwrap();
        assert_relative_eq!(sum, 3.0);
    }

    #[test]
    fn repeated_timestamps_pick_first_of_group() {
        let other = [pt(1.0, 0.0, 1.0), pt(50.0, 0.0, 1.0), pt(0.0, 0.0, 9.0)];
        // Before the group, inside it, and after it.
        let sum = nearest_timestamp_sum(&[pt(1.0, 0.0, 0.5)], &other).unwrap();
        assert_relative_eq!(sum, 0.0);
        let sum = nearest_timestamp_sum(&[pt(1.0, 0.0, 1.0)], &other).unwrap();
        assert_relative_eq!(sum, 0.0);
        let sum = nearest_timestamp_sum(&[pt(1.0, 0.0, 2.0)], &other).unwrap();
        assert_relative_eq!(sum, 0.0);
    }

    #[test]
    fn plateau_does_not_stall_the_scan() {
        let other = [pt(0.0, 0.0, 1.0), pt(0.0, 0.0, 1.0), pt(5.0, 0.0, 3.0)];
        let driver = [pt(0.0, 0.0, 1.0), pt(5.0, 0.0, 2.9)];
        assert_relative_eq!(nearest_timestamp_sum(&driver, &other).unwrap(), 0.0);
    }

    #[test]
    fn driver_outside_other_span_clamps_to_ends() {
        let other = [pt(0.0, 0.0, 5.0), pt(3.0, 4.0, 6.0)];
        let driver = [pt(0.0, 1.0, 0.0), pt(3.0, 5.0, 100.0)];
        assert_relative_eq!(nearest_timestamp_sum(&driver, &other).unwrap(), 2.0);
    }

    proptest! {
        #[test]
        fn prop_co_scan_matches_full_scan(
            mut driver_t in proptest::collection::vec(0u8..30, 1..20),
            mut other_t in proptest::collection::vec(0u8..30, 1..20),
        ) {
            driver_t.sort_unstable();
            other_t.sort_unstable();
            let driver: Vec<_> = driver_t
                .iter()
                .enumerate()
                .map(|(i, &t)| pt(i as f64, 1.0, t as f64 * 0.5))
                .collect();
            let other: Vec<_> = other_t
                .iter()
                .enumerate()
                .map(|(i, &t)| pt(2.0 * i as f64, -1.0, t as f64 * 0.5))
                .collect();

            let expected: f64 = driver
                .iter()
                .map(|p| p.distance_to(&other[nearest_by_scan(&other, p.t)]))
                .sum();
            let got = nearest_timestamp_sum(&driver, &other).unwrap();
            prop_assert!((got - expected).abs() < 1e-9, "got {got}, expected {expected}");
        }
    }
}
