// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes which OSM ways can be walked on, and thus become [Roads](crate::Road).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the profile.
    ///
    /// This value is not used for OSM data interpretation.
    pub name: &'a str,

    /// Array of tags which mark walkable OSM ways.
    /// A way is used if any of its tags matches exactly one of those.
    pub walkable: &'a [Walkable<'a>],

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for prohibitions.
    /// Only the most specific present tag is considered, so that e.g. `access=no` + `foot=yes`
    /// results in a walkable way.
    pub access: &'a [&'a str],
}

/// Key and value of an OSM tag marking a walkable way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walkable<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Profile<'a> {
    /// Checks if a way with the provided tags should be part of the walking network.
    pub fn is_walkable(&self, tags: &HashMap<String, String>) -> bool {
        self.matches_any(tags) && self.is_allowed(tags)
    }

    fn matches_any(&self, tags: &HashMap<String, String>) -> bool {
        self.walkable
            .iter()
            .any(|w| tags.get(w.key).map(|v| v.as_str()) == Some(w.value))
    }

    /// Checks if the way isn't forbidden by the most specific present access tag.
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        match self
            .access
            .iter()
            .rev()
            .find_map(|&mode| tags.get(mode).map(|v| v.as_str()))
        {
            Some("no") | Some("private") => false,
            _ => true,
        }
    }
}

/// Profile for pedestrian paths of parks, zoos and similar areas. Major roads are excluded,
/// as they only bound such areas.
pub const WALKING_PROFILE: Profile = Profile {
    name: "foot",
    walkable: &[
        Walkable {
            key: "highway",
            value: "footway",
        },
        Walkable {
            key: "highway",
            value: "path",
        },
        Walkable {
            key: "highway",
            value: "pedestrian",
        },
        Walkable {
            key: "highway",
            value: "steps",
        },
        Walkable {
            key: "highway",
            value: "living_street",
        },
        Walkable {
            key: "highway",
            value: "service",
        },
        Walkable {
            key: "highway",
            value: "track",
        },
        Walkable {
            key: "highway",
            value: "cycleway",
        },
        Walkable {
            key: "highway",
            value: "residential",
        },
        Walkable {
            key: "highway",
            value: "unclassified",
        },
        Walkable {
            key: "highway",
            value: "corridor",
        },
    ],
    access: &["access", "foot"],
};

#[cfg(test)]
mod tests {
    use super::{Profile, Walkable, WALKING_PROFILE};
    use std::collections::HashMap;

    const TEST_PROFILE: Profile = Profile {
        name: "cat",
        walkable: &[
            Walkable {
                key: "highway",
                value: "footway",
            },
            Walkable {
                key: "highway",
                value: "path",
            },
        ],
        access: &["access", "cat"],
    };

    macro_rules! tags {
        {} => { HashMap::default() };
        {$( $k:literal : $v:literal ),+} => {
            HashMap::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
        };
    }

    #[test]
    fn is_walkable() {
        assert!(TEST_PROFILE.is_walkable(&tags! {"highway": "footway"}));
        assert!(TEST_PROFILE.is_walkable(&tags! {"highway": "path"}));
        assert!(!TEST_PROFILE.is_walkable(&tags! {"highway": "motorway"}));
        assert!(!TEST_PROFILE.is_walkable(&tags! {}));
        assert!(!TEST_PROFILE.is_walkable(&tags! {"highway": "path", "access": "no"}));
        assert!(TEST_PROFILE.is_walkable(&tags! {"highway": "path", "access": "no", "cat": "destination"}));
    }

    #[test]
    fn is_allowed() {
        assert!(TEST_PROFILE.is_allowed(&tags! {"highway": "footway"}));
        assert!(!TEST_PROFILE.is_allowed(&tags! {"highway": "footway", "access": "no"}));
        assert!(!TEST_PROFILE.is_allowed(&tags! {"highway": "footway", "access": "private"}));
        assert!(TEST_PROFILE.is_allowed(&tags! {"highway": "footway", "access": "destination"}));
        assert!(
            TEST_PROFILE.is_allowed(&tags! {"highway": "footway", "access": "no", "cat": "yes"})
        );
        assert!(
            !TEST_PROFILE.is_allowed(&tags! {"highway": "footway", "access": "yes", "cat": "no"})
        );
    }

    #[test]
    fn walking_profile() {
        assert!(WALKING_PROFILE.is_walkable(&tags! {"highway": "steps"}));
        assert!(WALKING_PROFILE.is_walkable(&tags! {"highway": "service", "foot": "yes"}));
        assert!(!WALKING_PROFILE.is_walkable(&tags! {"highway": "primary"}));
        assert!(!WALKING_PROFILE.is_walkable(&tags! {"highway": "footway", "foot": "private"}));
        assert!(!WALKING_PROFILE.is_walkable(&tags! {"railway": "platform"}));
    }
}
