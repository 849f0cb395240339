//! Parallel execution must be indistinguishable from sequential execution.

mod common;

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use trackmatch::{
    BatchExecutor, ExecutorConfig, MatchConfig, MatchDirection, MatchPolicy, OverlapConfig,
    TrackStore, detect_overlaps, materialize,
};

fn sequential() -> ExecutorConfig {
    ExecutorConfig::default().with_parallel(false)
}

fn distances(store: &TrackStore, matcher: &MatchConfig, exec: ExecutorConfig) -> Vec<Option<f64>> {
    let pairs = detect_overlaps(store, &OverlapConfig::default()).unwrap();
    let rows = materialize(store, &pairs).unwrap();
    BatchExecutor::new(matcher.clone(), exec)
        .unwrap()
        .match_pairs(&rows)
        .unwrap()
}

#[test]
fn parallel_matches_sequential_for_every_policy() {
    let store = common::store(common::random_tracks(7, 120));
    for matcher in [
        MatchConfig::default(),
        MatchConfig::default().with_policy(MatchPolicy::Polyline),
        MatchConfig::default().with_direction(MatchDirection::Symmetric),
    ] {
        let expected = distances(&store, &matcher, sequential());
        assert!(expected.len() > 100);

        let global = distances(
            &store,
            &matcher,
            ExecutorConfig::default().with_min_rows_per_task(1),
        );
        assert_eq!(global, expected);

        let pooled = distances(
            &store,
            &matcher,
            ExecutorConfig::default()
                .with_num_threads(Some(4))
                .with_min_rows_per_task(3),
        );
        assert_eq!(pooled, expected);
    }
}

#[test]
fn concurrent_batches_share_one_store() {
    let store = Arc::new(common::store(common::random_tracks(11, 60)));
    let expected = distances(&store, &MatchConfig::default(), sequential());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                distances(
                    &store,
                    &MatchConfig::default(),
                    ExecutorConfig::default().with_min_rows_per_task(1),
                )
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), expected, "thread {i} diverged");
    }
}

#[test]
fn scoped_workers_borrow_rows_without_copying() {
    let store = common::store(common::random_tracks(23, 50));
    let pairs = detect_overlaps(&store, &OverlapConfig::default()).unwrap();
    let rows = materialize(&store, &pairs).unwrap();
    let exec = BatchExecutor::new(MatchConfig::default(), sequential()).unwrap();
    let expected = exec.match_pairs(&rows).unwrap();

    let mid = rows.len() / 2;
    let (left, right) = rows.split_at(mid);
    let (a, b) = thread::scope(|s| {
        let a = s.spawn(|| exec.match_pairs(left).unwrap());
        let b = s.spawn(|| exec.match_pairs(right).unwrap());
        (a.join().unwrap(), b.join().unwrap())
    });
    let joined: Vec<_> = a.into_iter().chain(b).collect();
    assert_eq!(joined, expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn output_order_is_independent_of_scheduling(
        seed in any::<u64>(),
        tracks in 2usize..60,
        threads in 1usize..8,
        chunk in 1usize..32,
    ) {
        let store = common::store(common::random_tracks(seed, tracks));
        let expected = distances(&store, &MatchConfig::default(), sequential());
        let got = distances(
            &store,
            &MatchConfig::default(),
            ExecutorConfig::default()
                .with_num_threads(Some(threads))
                .with_min_rows_per_task(chunk),
        );
        prop_assert_eq!(got, expected);
    }
}
