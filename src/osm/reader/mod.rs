// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use network_builder::NetworkBuilder;

use crate::osm::Profile;
use crate::{NetworkError, RoadNetwork};

mod model;
mod network_builder;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file by looking at its first bytes.
    fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1F, 0x8B]) {
            Self::XmlGz
        } else if prefix.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a [RoadNetwork].
#[derive(Debug)]
pub struct Options<'a> {
    /// Which OSM ways are walkable.
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter features by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f64; 4],
}

/// Error which can occur when loading a [RoadNetwork] from OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("network: {0}")]
    Network(#[from] NetworkError),
}

/// Parse OSM features from a reader into a [RoadNetwork] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn load_network_from_io<R: io::Read>(
    options: &Options<'_>,
    reader: R,
) -> Result<RoadNetwork, Error> {
    let mut b = io::BufReader::new(reader);
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        format => format,
    };

    let n = match format {
        FileFormat::Unknown | FileFormat::Xml => {
            NetworkBuilder::new(options).build(xml::Reader::from_io(b))?
        }

        FileFormat::XmlGz => {
            let d = io::BufReader::new(flate2::read::MultiGzDecoder::new(b));
            NetworkBuilder::new(options).build(xml::Reader::from_io(d))?
        }

        FileFormat::XmlBz2 => {
            let d = io::BufReader::new(bzip2::read::MultiBzDecoder::new(b));
            NetworkBuilder::new(options).build(xml::Reader::from_io(d))?
        }
    };
    Ok(n)
}

/// Parse OSM features from a file at the provided path into a [RoadNetwork]
/// as per the provided [Options].
pub fn load_network_from_file<P: AsRef<Path>>(
    options: &Options<'_>,
    path: P,
) -> Result<RoadNetwork, Error> {
    let f = File::open(path)?;
    load_network_from_io(options, f)
}

/// Parse OSM features from an in-memory buffer into a [RoadNetwork] as per the provided [Options].
pub fn load_network_from_buffer(options: &Options<'_>, data: &[u8]) -> Result<RoadNetwork, Error> {
    let is_plain_xml = match options.file_format {
        FileFormat::Xml => true,
        FileFormat::Unknown => FileFormat::detect(data) == FileFormat::Xml,
        _ => false,
    };

    if is_plain_xml {
        // Fast path is available for in-memory XML data
        NetworkBuilder::new(options).build(xml::Reader::from_buffer(data))
    } else {
        // Wrap the buffer in a cursor and use the IO path
        load_network_from_io(options, io::Cursor::new(data))
    }
}
