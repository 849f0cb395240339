#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trackmatch::{RawTrack, StoreConfig, TrackPoint, TrackStore};

pub fn pt(x: f64, y: f64, t: f64) -> TrackPoint {
    TrackPoint::new(x, y, t)
}

pub fn track(id: i64, points: &[(f64, f64, f64)]) -> RawTrack {
    RawTrack::from_points(id, points.iter().map(|&(x, y, t)| pt(x, y, t)))
}

pub fn store(tracks: Vec<RawTrack>) -> TrackStore {
    TrackStore::from_raw(tracks, &StoreConfig::default()).expect("valid fixture")
}

/// Track A of the offset-tracks scenario.
pub fn track_a(id: i64) -> RawTrack {
    track(id, &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)])
}

/// Track B: A shifted by +0.1 in y and +0.5 in t.
pub fn track_b(id: i64) -> RawTrack {
    track(id, &[(0.0, 0.1, 0.5), (1.0, 1.1, 1.5), (2.0, 2.1, 2.5)])
}

/// Random tracks with non-decreasing timestamps and some repeated samples.
pub fn random_tracks(seed: u64, count: usize) -> Vec<RawTrack> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let len = rng.gen_range(1..24);
            let mut t = rng.gen_range(0.0..200.0);
            let (mut xs, mut ys, mut ts) = (Vec::new(), Vec::new(), Vec::new());
            for _ in 0..len {
                if rng.gen_range(0..4) != 0 {
                    t += rng.gen_range(0.0..6.0);
                }
                xs.push(rng.gen_range(-50.0..50.0));
                ys.push(rng.gen_range(-50.0..50.0));
                ts.push(t);
            }
            RawTrack::new(i as i64 * 3 + 1, xs, ys, ts)
        })
        .collect()
}
