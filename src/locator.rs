// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;

use crate::kd::{KDTree, Point};
use crate::RoadNetwork;

/// A destination picked by the user: either a single point on the map,
/// or a whole area (like an animal enclosure), given as its outline.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Point { lon: f64, lat: f64 },

    /// Polygon outline as (lon, lat) vertices. The closing vertex may,
    /// but doesn't have to, repeat the first one.
    Polygon(Vec<(f64, f64)>),
}

impl Destination {
    /// Returns the (lon, lat) position towards which the route search is directed:
    /// the point itself, or the average of polygon vertices.
    ///
    /// Returns `None` for a polygon without any vertices.
    pub fn anchor(&self) -> Option<(f64, f64)> {
        match self {
            Self::Point { lon, lat } => Some((*lon, *lat)),
            Self::Polygon(vertices) => {
                let vertices = open_ring(vertices);
                if vertices.is_empty() {
                    return None;
                }

                let count = vertices.len() as f64;
                let (lon_sum, lat_sum) = vertices
                    .iter()
                    .fold((0.0, 0.0), |(lon, lat), v| (lon + v.0, lat + v.1));
                Some((lon_sum / count, lat_sum / count))
            }
        }
    }
}

/// Strips the closing vertex of a polygon ring, if it repeats the first one.
fn open_ring(vertices: &[(f64, f64)]) -> &[(f64, f64)] {
    match vertices {
        [first, .., last] if first == last => &vertices[..vertices.len() - 1],
        _ => vertices,
    }
}

/// Maps arbitrary positions to candidate connector nodes of a [RoadNetwork],
/// which can then be used as origins or destinations of a route search.
#[derive(Debug, Clone)]
pub struct Locator {
    tree: Option<KDTree>,
}

impl Locator {
    /// Indexes all connector nodes of the provided network.
    pub fn new(n: &RoadNetwork) -> Self {
        let mut points: Vec<Point> = n
            .connectors()
            .map(|nd| Point {
                id: nd.id,
                lon: nd.lon,
                lat: nd.lat,
            })
            .collect();

        log::debug!("indexing {} connectors", points.len());
        Self {
            tree: KDTree::build(&mut points),
        }
    }

    /// Finds the id of the connector node closest to the given position.
    ///
    /// Returns `None` only if the network has no connectors.
    pub fn nearest_connector(&self, lon: f64, lat: f64) -> Option<i64> {
        self.tree
            .as_ref()
            .map(|tree| tree.find_nearest(lon, lat).0.id)
    }

    /// Returns ids of the candidate connector nodes for reaching the provided [Destination],
    /// ordered by id.
    ///
    /// For a point, this is the nearest connector. For a polygon, this is the nearest
    /// connector to each of its vertices, so that the route may end at whichever side
    /// of an area is the closest.
    pub fn candidates(&self, destination: &Destination) -> Vec<i64> {
        let candidates: BTreeSet<i64> = match destination {
            Destination::Point { lon, lat } => {
                self.nearest_connector(*lon, *lat).into_iter().collect()
            }
            Destination::Polygon(vertices) => open_ring(vertices)
                .iter()
                .filter_map(|&(lon, lat)| self.nearest_connector(lon, lat))
                .collect(),
        };
        candidates.into_iter().collect()
    }
}
