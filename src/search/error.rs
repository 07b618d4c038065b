// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions caused by invalid arguments to [find_shortest_path](crate::find_shortest_path)
/// or [find_route](crate::find_route).
///
/// A missing route is not an error - it's reported as `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// An origin or destination node doesn't exist in the network.
    #[error("invalid node: {0}")]
    InvalidReference(i64),

    /// An origin or destination node exists, but is not a connector,
    /// and thus is not a vertex of the searched graph.
    #[error("node {0} is not a connector")]
    NotAConnector(i64),

    /// The destination point has a NaN or infinite coordinate.
    #[error("destination point must have finite coordinates")]
    NonFiniteDestinationPoint,
}
