// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::earth_distance;

/// A position indexed by the [KDTree].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
}

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// used to speed up nearest-neighbor search over network nodes.
///
/// This implementation assumes euclidean geometry, even though the distance function
/// used is [earth_distance]. This is fine for networks spanning a few kilometers,
/// but results are undefined close to the ante meridian or the poles.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Point,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest [Point] to the given position, returning it with the distance in meters.
    pub fn find_nearest(&self, lon: f64, lat: f64) -> (Point, f64) {
        self.find_nearest_impl(lon, lat, false)
    }

    fn find_nearest_impl(&self, lon: f64, lat: f64, lon_divides: bool) -> (Point, f64) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = earth_distance(lon, lat, best.lon, best.lat);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            lon < best.lon
        } else {
            lat < best.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_impl(lon, lat, !lon_divides);
            if is_better(alt, alt_dist, best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        if let Some(ref branch) = second {
            // A closer point is possible in the second branch if and only if
            // the splitting axis is not further than the current best candidate.
            let (axis_lon, axis_lat) = if lon_divides {
                (self.pivot.lon, lat)
            } else {
                (lon, self.pivot.lat)
            };
            let dist_to_axis = earth_distance(lon, lat, axis_lon, axis_lat);

            if dist_to_axis <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_impl(lon, lat, !lon_divides);
                if is_better(alt, alt_dist, best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        (best, best_dist)
    }

    /// Builds a k-d tree from a mutable slice of [Points](Point). Points will be reordered
    /// in the slice to facilitate building the tree.
    pub fn build(points: &mut [Point]) -> Option<Self> {
        Self::build_impl(points, false)
    }

    fn build_impl(points: &mut [Point], lon_divides: bool) -> Option<Self> {
        match points.len() {
            0 => None,
            1 => Some(Self {
                pivot: points[0],
                left: None,
                right: None,
            }),
            _ => {
                if lon_divides {
                    points.sort_by(|a, b| a.lon.total_cmp(&b.lon));
                } else {
                    points.sort_by(|a, b| a.lat.total_cmp(&b.lat));
                }
                let median = points.len() / 2;
                let pivot = points[median];
                let (left, right_and_pivot) = points.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

/// Equally distant points are resolved in favor of the lower id,
/// to make lookups independent of the tree shape.
#[inline]
fn is_better(candidate: Point, candidate_dist: f64, best: Point, best_dist: f64) -> bool {
    candidate_dist < best_dist || (candidate_dist == best_dist && candidate.id < best.id)
}
