// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading of [RoadNetworks](crate::RoadNetwork) from [OpenStreetMap](https://www.openstreetmap.org/) data.

mod profile;
mod reader;

pub use profile::{Profile, Walkable, WALKING_PROFILE};
pub use reader::{
    load_network_from_buffer, load_network_from_file, load_network_from_io, Error, FileFormat,
    Options,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{densify, find_shortest_path, RoadNetwork};

    const ZOO_XML: &[u8] = include_bytes!("reader/test_fixtures/zoo.osm");
    const ZOO_XML_GZ: &[u8] = include_bytes!("reader/test_fixtures/zoo.osm.gz");
    const ZOO_XML_BZ2: &[u8] = include_bytes!("reader/test_fixtures/zoo.osm.bz2");

    fn load(data: &[u8], file_format: FileFormat, bbox: [f64; 4]) -> RoadNetwork {
        let options = Options {
            profile: &WALKING_PROFILE,
            file_format,
            bbox,
        };
        load_network_from_buffer(&options, data).unwrap()
    }

    fn connector_ids(n: &RoadNetwork) -> Vec<i64> {
        let mut ids: Vec<i64> = n.connectors().map(|nd| nd.id).collect();
        ids.sort();
        ids
    }

    fn check_zoo_network(n: &RoadNetwork) {
        //           -6
        //          / │
        //      -10   -5
        //      /     │
        // -1──-2──-3──-4

        // -7, -8 and -9 are not part of walkable ways,
        // -11 has an invalid position
        assert_eq!(n.len(), 7);
        assert_eq!(connector_ids(n), vec![-6, -4, -3, -1]);

        let mut road_ids: Vec<i64> = n.roads().map(|r| r.id).collect();
        road_ids.sort();
        assert_eq!(road_ids, vec![-105, -101, -100]);

        assert_eq!(n.get_road(-100).unwrap().nodes, vec![-1, -2, -3, -4]);
        assert_eq!(n.get_node(-3).unwrap().roads.iter().cloned().collect::<Vec<_>>(), vec![-101, -100]);

        let shape = n.get_node(-10).unwrap();
        assert!(!shape.is_connector);
        assert_eq!(shape.lon, 14.4030);
        assert_eq!(shape.lat, 50.1165);
    }

    #[test]
    fn load_xml() {
        check_zoo_network(&load(ZOO_XML, FileFormat::Xml, [0.0; 4]));
    }

    #[test]
    fn load_xml_io() {
        let options = Options {
            profile: &WALKING_PROFILE,
            file_format: FileFormat::Xml,
            bbox: [0.0; 4],
        };
        let n = load_network_from_io(&options, std::io::Cursor::new(ZOO_XML)).unwrap();
        check_zoo_network(&n);
    }

    #[test]
    fn load_compressed() {
        check_zoo_network(&load(ZOO_XML_GZ, FileFormat::XmlGz, [0.0; 4]));
        check_zoo_network(&load(ZOO_XML_BZ2, FileFormat::XmlBz2, [0.0; 4]));
    }

    #[test]
    fn detect_format() {
        check_zoo_network(&load(ZOO_XML, FileFormat::Unknown, [0.0; 4]));
        check_zoo_network(&load(ZOO_XML_GZ, FileFormat::Unknown, [0.0; 4]));
        check_zoo_network(&load(ZOO_XML_BZ2, FileFormat::Unknown, [0.0; 4]));
    }

    #[test]
    fn bbox() {
        let n = load(ZOO_XML, FileFormat::Xml, [14.3990, 50.1140, 14.4025, 50.1210]);
        assert_eq!(n.len(), 5);
        assert_eq!(connector_ids(&n), vec![-6, -3, -1]);
        assert!(n.get_road(-105).is_none());
    }

    #[test]
    fn invalid_xml() {
        let options = Options {
            profile: &WALKING_PROFILE,
            file_format: FileFormat::Xml,
            bbox: [0.0; 4],
        };
        let result = load_network_from_buffer(&options, b"<osm><way id='1'></node></osm>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn route_over_loaded_network() {
        let n = load(ZOO_XML, FileFormat::Xml, [0.0; 4]);
        let path = find_shortest_path(&n, &[-1], &[-6], (14.4020, 50.1170))
            .unwrap()
            .expect("-6 must be reachable from -1");
        assert_eq!(path, vec![-1, -3, -6]);
        assert_eq!(densify(&n, &path), vec![-1, -2, -3, -5, -6]);

        let path = find_shortest_path(&n, &[-6], &[-4], (14.4030, 50.1150))
            .unwrap()
            .expect("-4 must be reachable from -6");
        assert_eq!(path, vec![-6, -4]);
        assert_eq!(densify(&n, &path), vec![-6, -10, -4]);
    }
}
