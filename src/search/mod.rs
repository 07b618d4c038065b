// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod node;

use std::collections::hash_map::{Entry, HashMap};
use std::collections::{BTreeSet, BinaryHeap, HashSet};

use crate::{RoadNetwork, RoadNode};
use node::{reconstruct_path, QueueItem, SearchNode};

pub use error::SearchError;

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest sequence of connector nodes leading from any of the `origins`
/// to any of the `destinations`.
///
/// `destination_point` (lon, lat) is the position of the chosen destination feature,
/// and only serves as the anchor of the heuristic - the search ends on the first
/// reached node from `destinations`, wherever it is. Both coordinates must be finite.
///
/// The cost of moving between two connectors on a common road is their great-circle distance.
/// Ties between equally promising nodes are broken by preferring the lower node id.
///
/// Returns `Ok(None)` if there is no route, or if `origins` or `destinations` are empty.
/// If a node is both an origin and a destination, a single-node path is returned without searching.
///
/// Returns [SearchError] if any of the provided nodes doesn't exist or isn't a connector,
/// or if `destination_point` isn't finite.
pub fn find_shortest_path(
    n: &RoadNetwork,
    origins: &[i64],
    destinations: &[i64],
    destination_point: (f64, f64),
) -> Result<Option<Vec<i64>>, SearchError> {
    if origins.is_empty() || destinations.is_empty() {
        return Ok(None);
    }

    let (dest_lon, dest_lat) = destination_point;
    if !dest_lon.is_finite() || !dest_lat.is_finite() {
        return Err(SearchError::NonFiniteDestinationPoint);
    }

    let origins = connectors_by_id(n, origins)?;
    let destinations: HashSet<i64> = connectors_by_id(n, destinations)?
        .into_iter()
        .map(|nd| nd.id)
        .collect();

    if let Some(shared) = origins.iter().find(|nd| destinations.contains(&nd.id)) {
        log::debug!("node {} is both an origin and a destination", shared.id);
        return Ok(Some(vec![shared.id]));
    }

    let s = search(n, &origins, &destinations, destination_point);
    match s.reached {
        Some(at) => {
            let path = reconstruct_path(&s.nodes, at);
            log::debug!(
                "found path of {} connectors ({:.1} m) after expanding {} nodes",
                path.len(),
                s.nodes[&at].cost_from_origin,
                s.expanded.len(),
            );
            Ok(Some(path))
        }

        None => {
            log::debug!("no path found after expanding {} nodes", s.expanded.len());
            Ok(None)
        }
    }
}

/// State left behind by a finished [search].
struct Search {
    /// Best known way of reaching every discovered node.
    nodes: HashMap<i64, SearchNode>,

    /// Ids of closed nodes, in the order they were expanded.
    expanded: Vec<i64>,

    /// The destination node at which the search has stopped.
    reached: Option<i64>,
}

fn search(
    n: &RoadNetwork,
    origins: &[&RoadNode],
    destinations: &HashSet<i64>,
    (dest_lon, dest_lat): (f64, f64),
) -> Search {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut nodes: HashMap<i64, SearchNode> = HashMap::default();
    let mut closed: HashSet<i64> = HashSet::default();
    let mut expanded: Vec<i64> = Vec::default();
    let origin_ids: HashSet<i64> = origins.iter().map(|nd| nd.id).collect();

    for origin in origins {
        let item = SearchNode::origin(origin.distance_to_point(dest_lon, dest_lat));
        queue.push(QueueItem {
            at: origin.id,
            priority: item.priority(),
        });
        nodes.insert(origin.id, item);
    }

    while let Some(QueueItem { at, .. }) = queue.pop() {
        // Entries left behind by improved nodes point at already closed nodes
        if !closed.insert(at) {
            continue;
        }
        expanded.push(at);

        if destinations.contains(&at) {
            return Search {
                nodes,
                expanded,
                reached: Some(at),
            };
        }

        let current = nodes[&at];
        let current_node = n
            .get_node(at)
            .expect("search nodes may only be created for existing road nodes");

        for road in n.roads_of(current_node) {
            for &neighbor_id in &road.nodes {
                if neighbor_id == at
                    || origin_ids.contains(&neighbor_id)
                    || closed.contains(&neighbor_id)
                {
                    continue;
                }

                let neighbor = n
                    .get_node(neighbor_id)
                    .expect("roads may only refer to existing road nodes");
                if !neighbor.is_connector {
                    continue;
                }

                let candidate = SearchNode {
                    cost_from_origin: current.cost_from_origin
                        + current_node.distance_to(neighbor),
                    heuristic_to_destination: neighbor.distance_to_point(dest_lon, dest_lat),
                    predecessor: Some(at),
                };

                match nodes.entry(neighbor_id) {
                    Entry::Vacant(e) => {
                        e.insert(candidate);
                    }
                    Entry::Occupied(mut e) => {
                        if candidate.priority() < e.get().priority() {
                            e.insert(candidate);
                        } else {
                            continue;
                        }
                    }
                }

                queue.push(QueueItem {
                    at: neighbor_id,
                    priority: candidate.priority(),
                });
            }
        }
    }

    Search {
        nodes,
        expanded,
        reached: None,
    }
}

/// Resolves node ids to connector [RoadNodes](RoadNode), deduplicated and ordered by id.
fn connectors_by_id<'a>(
    n: &'a RoadNetwork,
    ids: &[i64],
) -> Result<Vec<&'a RoadNode>, SearchError> {
    let ids: BTreeSet<i64> = ids.iter().cloned().collect();
    ids.into_iter()
        .map(|id| match n.get_node(id) {
            Some(nd) if nd.is_connector => Ok(nd),
            Some(_) => Err(SearchError::NotAConnector(id)),
            None => Err(SearchError::InvalidReference(id)),
        })
        .collect()
}
