// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{Road, RoadNetwork, RoadNode};

use super::{model, Error, Options};

/// Helper object used for storing state related to converting [OSM features](super::model::Feature)
/// into a [RoadNetwork].
pub(super) struct NetworkBuilder<'a> {
    options: &'a Options<'a>,
    positions: HashMap<i64, (f64, f64)>,
    roads: Vec<Road>,
    ignore_bbox: bool,
}

impl<'a> NetworkBuilder<'a> {
    /// Create a new, empty network builder.
    pub(super) fn new(options: &'a Options<'a>) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        Self {
            options,
            positions: HashMap::default(),
            roads: Vec::default(),
            ignore_bbox,
        }
    }

    /// Adds all features from the provided iterator and builds the resulting [RoadNetwork].
    pub(super) fn build<I, E>(mut self, features: I) -> Result<RoadNetwork, Error>
    where
        I: IntoIterator<Item = Result<model::Feature, E>>,
        Error: From<E>,
    {
        for f in features {
            match f? {
                model::Feature::Node(n) => self.add_node(n),
                model::Feature::Way(w) => self.add_way(w),
            }
        }
        self.finish()
    }

    fn add_node(&mut self, n: model::Node) {
        if self.is_in_bbox(n.lon, n.lat) {
            self.positions.insert(n.id, (n.lon, n.lat));
        }
    }

    fn is_in_bbox(&self, lon: f64, lat: f64) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        if !self.options.profile.is_walkable(&w.tags) {
            return;
        }

        // Remove references to unknown nodes
        let mut nodes: Vec<i64> = w
            .nodes
            .iter()
            .cloned()
            .filter(|node_id| self.positions.contains_key(node_id))
            .collect();
        nodes.dedup();

        if nodes.len() < 2 {
            log::warn!("skipping way {}: less than 2 known nodes", w.id);
            return;
        }

        self.roads.push(Road { id: w.id, nodes });
    }

    fn finish(self) -> Result<RoadNetwork, Error> {
        let mut memberships: HashMap<i64, BTreeSet<i64>> = HashMap::default();
        let mut connectors: HashSet<i64> = HashSet::default();

        for road in &self.roads {
            let mut seen_on_road: HashSet<i64> = HashSet::default();
            for &node_id in &road.nodes {
                memberships.entry(node_id).or_default().insert(road.id);

                // A road crossing itself creates a junction
                if !seen_on_road.insert(node_id) {
                    connectors.insert(node_id);
                }
            }

            connectors.insert(road.nodes[0]);
            connectors.insert(road.nodes[road.nodes.len() - 1]);
        }

        connectors.extend(
            memberships
                .iter()
                .filter(|(_, roads)| roads.len() > 1)
                .map(|(&node_id, _)| node_id),
        );

        let nodes = memberships.into_iter().map(|(id, roads)| {
            let (lon, lat) = self.positions[&id];
            RoadNode {
                id,
                lon,
                lat,
                is_connector: connectors.contains(&id),
                roads,
            }
        });

        Ok(RoadNetwork::new(nodes, self.roads)?)
    }
}
