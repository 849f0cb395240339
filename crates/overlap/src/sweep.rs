//! Sweep-line interval join.
//!
//! Intervals are visited in order of `start`. The active set is a min-heap
//! keyed by `end`; anything ending before the current start can never meet
//! a later interval either and is evicted. Every interval still active
//! intersects the current one, so each emitted pair costs `O(1)` and the
//! whole join is `O(N log N + K)`.
//!
//! A pair is found exactly once: when the later-starting member is visited,
//! the earlier one is still in the heap because its `end` is at least the
//! later start.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use store::TrackInterval;

use crate::types::OverlapPair;

/// Heap entry ordered so that `BinaryHeap` pops the smallest `end` first.
#[derive(Debug, Clone, Copy)]
struct Active {
    end: f64,
    slot: usize,
}

impl Ord for Active {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .end
            .total_cmp(&self.end)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for Active {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Active {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Active {}

pub(crate) fn sweep_line(intervals: &[TrackInterval]) -> Vec<OverlapPair> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        intervals[a]
            .start
            .total_cmp(&intervals[b].start)
            .then_with(|| intervals[a].id.cmp(&intervals[b].id))
    });

    let mut active: BinaryHeap<Active> = BinaryHeap::with_capacity(intervals.len());
    let mut pairs = Vec::new();

    for slot in order {
        let current = &intervals[slot];

        while let Some(top) = active.peek() {
            if top.end < current.start {
                active.pop();
            } else {
                break;
            }
        }

        for member in active.iter() {
            let other = &intervals[member.slot];
            if other.intersects(current) {
                pairs.push(OverlapPair::from_intervals(other, current));
            }
        }

        active.push(Active {
            end: current.end,
            slot,
        });
    }

    pairs.sort_unstable_by(|a, b| a.ids().cmp(&b.ids()));
    pairs
}
