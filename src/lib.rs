// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Pedestrian wayfinding over a fixed network of walking paths, like those of a zoo or a park.
//!
//! The walking network is represented as a [RoadNetwork] of [Roads](Road) - polylines of
//! [RoadNodes](RoadNode). Only connector nodes (junctions and road ends) take part in route
//! search; other nodes just describe the shape of roads and are added back into the route
//! by [densify]. Networks can be built from any source with [RoadNetwork::new], or loaded
//! from [OpenStreetMap](https://www.openstreetmap.org/) data with the [osm] module.
//!
//! # Example
//!
//! ```no_run
//! let options = zoowalk::osm::Options {
//!     profile: &zoowalk::osm::WALKING_PROFILE,
//!     file_format: zoowalk::osm::FileFormat::Unknown,
//!     bbox: [0.0; 4],
//! };
//! let network = zoowalk::osm::load_network_from_file(&options, "path/to/zoo.osm")
//!     .expect("failed to load zoo.osm");
//!
//! let locator = zoowalk::Locator::new(&network);
//! let start = locator.nearest_connector(14.4065, 50.1165).unwrap();
//! let destination = zoowalk::Destination::Point { lon: 14.40813, lat: 50.11502 };
//!
//! let route = zoowalk::find_route(
//!     &network,
//!     &[start],
//!     &locator.candidates(&destination),
//!     destination.anchor().unwrap(),
//! )
//! .expect("invalid route request");
//!
//! match route {
//!     Some(route) => println!("Route: {:?}", route.coordinates()),
//!     None => println!("Destination is unreachable"),
//! }
//! ```

mod densify;
mod distance;
mod kd;
mod locator;
mod network;
pub mod osm;
mod search;

pub use densify::{densify, find_route, Route};
pub use distance::earth_distance;
pub use locator::{Destination, Locator};
pub use network::{NetworkError, Road, RoadNetwork, RoadNode};
pub use search::{find_shortest_path, SearchError};
