use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trackmatch::{
    BatchExecutor, ExecutorConfig, MatchConfig, MatchPolicy, OverlapConfig, OverlapStrategy,
    RawTrack, StoreConfig, TrackStore, detect_overlaps, materialize,
};

fn synthetic_store(tracks: usize, seed: u64) -> TrackStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw = (0..tracks)
        .map(|i| {
            let len = rng.gen_range(20..200);
            let mut t = rng.gen_range(0.0..10_000.0);
            let (mut xs, mut ys, mut ts) = (
                Vec::with_capacity(len),
                Vec::with_capacity(len),
                Vec::with_capacity(len),
            );
            let (mut x, mut y) = (rng.gen_range(0.0..1_000.0), rng.gen_range(0.0..1_000.0));
            for _ in 0..len {
                t += rng.gen_range(0.1..2.0);
                x += rng.gen_range(-1.0..1.0);
                y += rng.gen_range(-1.0..1.0);
                xs.push(x);
                ys.push(y);
                ts.push(t);
            }
            RawTrack::new(i as i64, xs, ys, ts)
        })
        .collect();
    TrackStore::from_raw(raw, &StoreConfig::default()).expect("synthetic tracks are valid")
}

fn overlap_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_overlaps");
    for tracks in [500usize, 2_000] {
        let store = synthetic_store(tracks, 42);
        for strategy in [OverlapStrategy::SweepLine, OverlapStrategy::CrossJoin] {
            let cfg = OverlapConfig::default().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), tracks),
                &store,
                |b, store| b.iter(|| black_box(detect_overlaps(store, &cfg).expect("detect"))),
            );
        }
    }
    group.finish();
}

fn match_bench(c: &mut Criterion) {
    let store = synthetic_store(1_000, 7);
    let pairs = detect_overlaps(&store, &OverlapConfig::default()).expect("detect");
    let rows = materialize(&store, &pairs).expect("materialize");

    let mut group = c.benchmark_group("match_pairs");
    for (name, matcher, parallel) in [
        ("nearest_sequential", MatchConfig::default(), false),
        ("nearest_parallel", MatchConfig::default(), true),
        (
            "polyline_parallel",
            MatchConfig::default().with_policy(MatchPolicy::Polyline),
            true,
        ),
    ] {
        let exec = BatchExecutor::new(matcher, ExecutorConfig::default().with_parallel(parallel))
            .expect("executor");
        group.bench_function(name, |b| {
            b.iter(|| black_box(exec.match_pairs(black_box(&rows)).expect("match")))
        });
    }
    group.finish();
}

criterion_group!(benches, overlap_bench, match_bench);
criterion_main!(benches);
