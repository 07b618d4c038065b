use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct NetworkLoadError(PathBuf, #[source] zoowalk::osm::Error);

#[derive(Debug, thiserror::Error)]
#[error("the network has no walkable paths")]
struct EmptyNetworkError;

#[derive(Debug, thiserror::Error)]
#[error("no walking route to the destination")]
struct UnreachableError;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for zoowalk::osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => Self::Unknown,
            Format::Xml => Self::Xml,
            Format::XmlGz => Self::XmlGz,
            Format::XmlBz2 => Self::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// Longitude of the start point
    start_lon: f64,

    /// Latitude of the start point
    start_lat: f64,

    /// Longitude of the destination point
    end_lon: f64,

    /// Latitude of the destination point
    end_lat: f64,

    /// Format of the OSM file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let network = load_network(&cli.osm_file, cli.format)?;
    let locator = zoowalk::Locator::new(&network);
    let destination = zoowalk::Destination::Point {
        lon: cli.end_lon,
        lat: cli.end_lat,
    };

    let start = locator
        .nearest_connector(cli.start_lon, cli.start_lat)
        .ok_or(EmptyNetworkError)?;
    let candidates = locator.candidates(&destination);
    let anchor = destination.anchor().ok_or(EmptyNetworkError)?;

    let route = zoowalk::find_route(&network, &[start], &candidates, anchor)?
        .ok_or(UnreachableError)?;
    log::info!(
        "route over {} nodes, {:.0} m long",
        route.nodes.len(),
        route.length()
    );

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut coordinates = route.coordinates().into_iter().peekable();
    while let Some((lon, lat)) = coordinates.next() {
        let suffix = if coordinates.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", lon, lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn load_network<P: AsRef<Path>>(
    path: P,
    format: Format,
) -> Result<zoowalk::RoadNetwork, NetworkLoadError> {
    let options = zoowalk::osm::Options {
        profile: &zoowalk::osm::WALKING_PROFILE,
        file_format: format.into(),
        bbox: [0.0; 4],
    };
    zoowalk::osm::load_network_from_file(&options, path.as_ref())
        .map_err(|e| NetworkLoadError(PathBuf::from(path.as_ref()), e))
}
