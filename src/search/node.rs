// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Per-search state of a visited connector node. Search nodes are stored in an arena
/// keyed by the node id, so the predecessor is just the id of another entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SearchNode {
    pub cost_from_origin: f64,
    pub heuristic_to_destination: f64,
    pub predecessor: Option<i64>,
}

impl SearchNode {
    #[inline]
    pub fn origin(heuristic_to_destination: f64) -> Self {
        Self {
            cost_from_origin: 0.0,
            heuristic_to_destination,
            predecessor: None,
        }
    }

    #[inline]
    pub fn priority(&self) -> f64 {
        self.cost_from_origin + self.heuristic_to_destination
    }
}

/// Entry of the open set. Entries are never removed from the queue when a node gets a better
/// priority, instead a new entry is pushed and outdated ones are skipped when popped.
#[derive(Debug, Clone, Copy)]
pub(super) struct QueueItem {
    pub at: i64,
    pub priority: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower priorities (and then lower ids) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// Follows predecessor links from `last` back to an origin, returning the ids in
/// origin-to-`last` order.
pub(super) fn reconstruct_path(nodes: &HashMap<i64, SearchNode>, mut last: i64) -> Vec<i64> {
    let mut path = vec![last];

    while let Some(before) = nodes.get(&last).and_then(|n| n.predecessor) {
        path.push(before);
        last = before;
    }

    path.reverse();
    path
}
