// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};
use std::collections::BTreeSet;

use crate::earth_distance;

/// A point of the walking network.
///
/// Connector nodes are graph vertices: junctions, where two or more [Roads](Road) meet,
/// or road ends. Other nodes only describe the shape of exactly one road.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadNode {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
    pub is_connector: bool,

    /// Ids of all [Roads](Road) which contain this node.
    pub roads: BTreeSet<i64>,
}

impl RoadNode {
    /// Returns the great-circle distance to another node, in meters.
    #[inline]
    pub fn distance_to(&self, other: &RoadNode) -> f64 {
        earth_distance(self.lon, self.lat, other.lon, other.lat)
    }

    /// Returns the great-circle distance to an arbitrary lon-lat position, in meters.
    #[inline]
    pub fn distance_to_point(&self, lon: f64, lat: f64) -> f64 {
        earth_distance(self.lon, self.lat, lon, lat)
    }
}

/// An ordered walking segment. Only consecutive nodes are directly adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Road {
    pub id: i64,
    pub nodes: Vec<i64>,
}

impl Road {
    /// Returns the index of the first occurrence of `node_id` on this road.
    pub fn position(&self, node_id: i64) -> Option<usize> {
        self.nodes.iter().position(|&id| id == node_id)
    }

    /// Returns indices of all occurrences of `node_id` on this road.
    /// A node may appear more than once on a loop.
    pub fn positions(&self, node_id: i64) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| id == node_id)
            .map(|(idx, _)| idx)
    }

    #[inline]
    pub fn contains(&self, node_id: i64) -> bool {
        self.nodes.contains(&node_id)
    }
}

/// Reasons why a set of [RoadNode] and [Road] records can't form a [RoadNetwork].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("duplicate node {0}")]
    DuplicateNode(i64),

    #[error("duplicate road {0}")]
    DuplicateRoad(i64),

    #[error("road {0} has less than 2 nodes")]
    RoadTooShort(i64),

    #[error("road {road} references unknown node {node}")]
    UnknownNode { road: i64, node: i64 },

    #[error("node {node} references unknown road {road}")]
    UnknownRoad { node: i64, road: i64 },

    #[error("node {node} is on road {road}, but does not list it")]
    MissingMembership { node: i64, road: i64 },

    #[error("node {node} lists road {road}, but is not on it")]
    NotOnRoad { node: i64, road: i64 },

    #[error("non-connector node {node} belongs to {count} roads instead of 1")]
    NonConnectorMembership { node: i64, count: usize },

    #[error("connector node {0} does not belong to any road")]
    DetachedConnector(i64),

    #[error("end node {node} of road {road} is not a connector")]
    EndpointNotConnector { road: i64, node: i64 },

    #[error("node {0} has a non-finite position")]
    NonFinitePosition(i64),
}

/// Represents a walking network as a set of [RoadNodes](RoadNode) and
/// [Roads](Road) between them.
///
/// The network is validated when constructed and is immutable afterwards,
/// it can be freely shared between threads running concurrent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoadNetwork {
    nodes: HashMap<i64, RoadNode>,
    roads: HashMap<i64, Road>,
}

impl RoadNetwork {
    /// Builds a network from node and road records, checking that they
    /// describe a consistent network.
    pub fn new<N, R>(nodes: N, roads: R) -> Result<Self, NetworkError>
    where
        N: IntoIterator<Item = RoadNode>,
        R: IntoIterator<Item = Road>,
    {
        let mut n = Self::default();

        for node in nodes {
            match n.nodes.entry(node.id) {
                Entry::Vacant(e) => {
                    e.insert(node);
                }
                Entry::Occupied(e) => return Err(NetworkError::DuplicateNode(*e.key())),
            }
        }

        for road in roads {
            match n.roads.entry(road.id) {
                Entry::Vacant(e) => {
                    e.insert(road);
                }
                Entry::Occupied(e) => return Err(NetworkError::DuplicateRoad(*e.key())),
            }
        }

        n.validate()?;
        log::info!(
            "road network ready: {} nodes ({} connectors), {} roads",
            n.nodes.len(),
            n.connectors().count(),
            n.roads.len(),
        );
        Ok(n)
    }

    fn validate(&self) -> Result<(), NetworkError> {
        for road in self.roads.values() {
            if road.nodes.len() < 2 {
                return Err(NetworkError::RoadTooShort(road.id));
            }

            for &node_id in &road.nodes {
                let node = self.nodes.get(&node_id).ok_or(NetworkError::UnknownNode {
                    road: road.id,
                    node: node_id,
                })?;

                if !node.roads.contains(&road.id) {
                    return Err(NetworkError::MissingMembership {
                        node: node_id,
                        road: road.id,
                    });
                }
            }

            for &end in [road.nodes[0], road.nodes[road.nodes.len() - 1]].iter() {
                if !self.nodes[&end].is_connector {
                    return Err(NetworkError::EndpointNotConnector {
                        road: road.id,
                        node: end,
                    });
                }
            }
        }

        for node in self.nodes.values() {
            if !node.lon.is_finite() || !node.lat.is_finite() {
                return Err(NetworkError::NonFinitePosition(node.id));
            }

            for &road_id in &node.roads {
                let road = self.roads.get(&road_id).ok_or(NetworkError::UnknownRoad {
                    node: node.id,
                    road: road_id,
                })?;

                if !road.contains(node.id) {
                    return Err(NetworkError::NotOnRoad {
                        node: node.id,
                        road: road_id,
                    });
                }
            }

            if node.is_connector && node.roads.is_empty() {
                return Err(NetworkError::DetachedConnector(node.id));
            } else if !node.is_connector && node.roads.len() != 1 {
                return Err(NetworkError::NonConnectorMembership {
                    node: node.id,
                    count: node.roads.len(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of nodes in the network.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [RoadNodes](RoadNode) in the network, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.nodes.values()
    }

    /// Returns an iterator over all connector [RoadNodes](RoadNode), in no particular order.
    pub fn connectors(&self) -> impl Iterator<Item = &RoadNode> {
        self.nodes.values().filter(|n| n.is_connector)
    }

    /// Returns an iterator over all [Roads](Road) in the network, in no particular order.
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    /// Retrieves a [RoadNode] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<&RoadNode> {
        self.nodes.get(&id)
    }

    /// Retrieves a [Road] with the provided id.
    pub fn get_road(&self, id: i64) -> Option<&Road> {
        self.roads.get(&id)
    }

    /// Returns all [Roads](Road) the provided node belongs to, ordered by road id.
    ///
    /// Panics if the node refers to a road which doesn't exist, which can only happen
    /// if the node doesn't come from this network.
    pub fn roads_of<'a, 'b>(&'a self, node: &'b RoadNode) -> impl Iterator<Item = &'a Road> + 'b
    where
        'a: 'b,
    {
        node.roads.iter().map(move |road_id| {
            self.roads
                .get(road_id)
                .expect("RoadNetwork nodes may only refer to existing roads")
        })
    }

    /// Finds the shortest stretch of a single [Road] between two nodes.
    ///
    /// Returns the road, together with the indices of `a` and `b` on it. If the nodes share
    /// several roads, or appear more than once on a loop, the stretch with the smallest
    /// [along-road distance](Self::along_road_distance) is picked, preferring lower road ids
    /// on ties. Returns `None` if the nodes don't share any road.
    pub fn shortest_shared_stretch(
        &self,
        a: &RoadNode,
        b: &RoadNode,
    ) -> Option<(&Road, usize, usize)> {
        let mut best: Option<(f64, &Road, usize, usize)> = None;

        for road in self.roads_of(a).filter(|road| b.roads.contains(&road.id)) {
            if let Some((length, a_idx, b_idx)) = self.shortest_stretch(road, a.id, b.id) {
                if best.map_or(true, |(best_length, ..)| length < best_length) {
                    best = Some((length, road, a_idx, b_idx));
                }
            }
        }

        best.map(|(_, road, a_idx, b_idx)| (road, a_idx, b_idx))
    }

    /// Finds the closest connector [RoadNode] to the given position.
    ///
    /// This function requires computing the distance to every node in the network,
    /// and is not suitable for large networks. See [Locator](crate::Locator) for
    /// an indexed alternative.
    pub fn find_nearest_connector(&self, lon: f64, lat: f64) -> Option<&RoadNode> {
        self.connectors()
            .map(|nd| (nd.distance_to_point(lon, lat), nd))
            .min_by(|(a_dist, a), (b_dist, b)| a_dist.total_cmp(b_dist).then(a.id.cmp(&b.id)))
            .map(|(_, nd)| nd)
    }

    /// Computes the distance walked along the provided road between two of its nodes,
    /// in meters, by summing up the lengths of all segments in between.
    /// On loops, the shorter way around is taken.
    ///
    /// Returns `None` if the road doesn't exist or doesn't contain both nodes.
    pub fn along_road_distance(&self, road_id: i64, from_id: i64, to_id: i64) -> Option<f64> {
        let road = self.roads.get(&road_id)?;
        self.shortest_stretch(road, from_id, to_id).map(|(length, ..)| length)
    }

    fn shortest_stretch(
        &self,
        road: &Road,
        from_id: i64,
        to_id: i64,
    ) -> Option<(f64, usize, usize)> {
        let mut best: Option<(f64, usize, usize)> = None;

        for from_idx in road.positions(from_id) {
            for to_idx in road.positions(to_id) {
                let length = self.stretch_length(road, from_idx, to_idx);
                if best.map_or(true, |(best_length, ..)| length < best_length) {
                    best = Some((length, from_idx, to_idx));
                }
            }
        }

        best
    }

    fn stretch_length(&self, road: &Road, from_idx: usize, to_idx: usize) -> f64 {
        let (lo, hi) = (from_idx.min(to_idx), from_idx.max(to_idx));
        road.nodes[lo..=hi]
            .windows(2)
            .map(|pair| self.nodes[&pair[0]].distance_to(&self.nodes[&pair[1]]))
            .sum()
    }
}
