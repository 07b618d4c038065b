// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{find_shortest_path, RoadNetwork, RoadNode, SearchError};

/// Expands a path of connector nodes (as returned by [find_shortest_path]) into
/// the full sequence of nodes to walk through, including all nodes which only describe
/// the shape of roads between the connectors.
///
/// Consecutive connectors must share a road - this is always the case for paths
/// returned by [find_shortest_path], and this function panics otherwise.
/// If they share more than one road (or meet twice on a loop), the shortest
/// stretch between them is drawn.
pub fn densify(n: &RoadNetwork, connector_path: &[i64]) -> Vec<i64> {
    let mut route = Vec::with_capacity(connector_path.len());

    for pair in connector_path.windows(2) {
        let prev = get_path_node(n, pair[0]);
        let curr = get_path_node(n, pair[1]);

        let (road, prev_idx, curr_idx) =
            n.shortest_shared_stretch(prev, curr).unwrap_or_else(|| {
                panic!(
                    "consecutive path nodes {} and {} don't share a road",
                    prev.id, curr.id
                )
            });

        let mut segment = road.nodes[prev_idx.min(curr_idx)..=prev_idx.max(curr_idx)].to_vec();

        // Roads may run against the direction of travel
        if prev_idx > curr_idx {
            segment.reverse();
        }

        // The last node is curr, which is added by the next segment (or at the very end)
        segment.pop();
        route.extend(segment);
    }

    route.extend(connector_path.last());
    route
}

fn get_path_node(n: &RoadNetwork, id: i64) -> &RoadNode {
    n.get_node(id)
        .unwrap_or_else(|| panic!("path refers to unknown node {id}"))
}

/// A walking route, ready to be drawn on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// All nodes to walk through, from the origin to the destination.
    pub nodes: Vec<RoadNode>,
}

impl Route {
    /// Returns ids of all nodes on the route.
    pub fn ids(&self) -> Vec<i64> {
        self.nodes.iter().map(|nd| nd.id).collect()
    }

    /// Returns (lon, lat) positions of all nodes on the route.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.nodes.iter().map(|nd| (nd.lon, nd.lat)).collect()
    }

    /// Returns the walking length of the route, in meters.
    pub fn length(&self) -> f64 {
        self.nodes
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

/// Finds the shortest walking [Route] from any of the `origins` to any of the `destinations`,
/// see [find_shortest_path] for the description of arguments.
///
/// Returns `Ok(None)` if the destinations are unreachable.
pub fn find_route(
    n: &RoadNetwork,
    origins: &[i64],
    destinations: &[i64],
    destination_point: (f64, f64),
) -> Result<Option<Route>, SearchError> {
    let path = match find_shortest_path(n, origins, destinations, destination_point)? {
        Some(path) => path,
        None => return Ok(None),
    };

    let nodes = densify(n, &path)
        .into_iter()
        .map(|id| get_path_node(n, id).clone())
        .collect();

    Ok(Some(Route { nodes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::tests::{build_network, road, simple_network};

    #[test]
    fn single_node() {
        let n = simple_network();
        assert_eq!(densify(&n, &[3]), vec![3]);
        assert_eq!(densify(&n, &[]), Vec::<i64>::new());
    }

    #[test]
    fn along_road_direction() {
        let n = simple_network();
        assert_eq!(densify(&n, &[1, 2]), vec![1, 11, 12, 2]);
        assert_eq!(densify(&n, &[3, 2]), vec![3, 21, 2]);
    }

    #[test]
    fn against_road_direction() {
        let n = simple_network();
        assert_eq!(densify(&n, &[2, 1]), vec![2, 12, 11, 1]);
        assert_eq!(densify(&n, &[2, 3]), vec![2, 21, 3]);
    }

    #[test]
    fn multiple_roads() {
        let n = simple_network();
        let route = densify(&n, &[1, 3, 2, 1]);
        assert_eq!(route, vec![1, 13, 3, 21, 2, 12, 11, 1]);
        assert!(route.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn parallel_roads_take_the_shorter_one() {
        //   10 ── 11 ── 12
        //   │            │
        //   1 ── 20 ──── 2
        let n = build_network(
            &[
                (1, 0.000, 0.0),
                (10, 0.000, 0.005),
                (11, 0.001, 0.006),
                (12, 0.002, 0.005),
                (20, 0.001, 0.0001),
                (2, 0.002, 0.0),
            ],
            vec![road(1, &[1, 10, 11, 12, 2]), road(2, &[1, 20, 2])],
        );

        assert_eq!(densify(&n, &[1, 2]), vec![1, 20, 2]);
        assert_eq!(densify(&n, &[2, 1]), vec![2, 20, 1]);

        let route = super::find_route(&n, &[1], &[2], (0.002, 0.0))
            .unwrap()
            .expect("route 1 -> 2 must exist");
        assert_eq!(route.ids(), vec![1, 20, 2]);
        assert!((route.length() - n.along_road_distance(2, 1, 2).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn loop_takes_the_shorter_side() {
        let n = build_network(
            &[
                (1, 0.000, 0.0),
                (30, 0.000, 0.003),
                (31, 0.002, 0.003),
                (2, 0.002, 0.0),
                (32, 0.001, -0.0005),
                (40, 0.003, 0.0),
            ],
            vec![road(5, &[1, 30, 31, 2, 32, 1]), road(6, &[2, 40])],
        );

        assert_eq!(densify(&n, &[1, 2]), vec![1, 32, 2]);
        assert_eq!(densify(&n, &[2, 1]), vec![2, 32, 1]);
        assert_eq!(densify(&n, &[40, 2, 1]), vec![40, 2, 32, 1]);
    }

    #[test]
    #[should_panic(expected = "don't share a road")]
    fn disconnected_connectors() {
        let n = simple_network();
        densify(&n, &[1, 8]);
    }

    #[test]
    fn find_route() {
        let n = simple_network();
        let route = super::find_route(&n, &[1], &[2], (0.003, 0.002))
            .unwrap()
            .expect("route 1 -> 2 must exist");

        assert_eq!(route.ids(), vec![1, 11, 12, 2]);
        assert_eq!(
            route.coordinates(),
            vec![(0.0, 0.002), (0.001, 0.0025), (0.002, 0.0025), (0.003, 0.002)],
        );
        assert!((route.length() - n.along_road_distance(100, 1, 2).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn find_route_unreachable() {
        let n = simple_network();
        assert_eq!(super::find_route(&n, &[1], &[9], (0.012, 0.01)), Ok(None));
    }
}
