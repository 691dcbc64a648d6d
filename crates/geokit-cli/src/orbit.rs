//! # Orbit Map Subcommand
//!
//! Maps a GMAT orbit report to a KML ground track.
//!
//! The report is read row by row; every other row (even zero-based row
//! numbers) between the first and last selected rows, inclusive, becomes a
//! point. Thinning keeps Google Earth responsive on long reports. The first
//! two whitespace-separated columns of a row are latitude and longitude.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use geokit_core::{DefaultsBinder, RestrictedMap};
use geokit_kml::{Coordinates, KmlDocument, LineString, LineStyle};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::CliConfig;

/// Arguments for the `geokit orbit-map` subcommand.
#[derive(Args, Debug)]
pub struct OrbitMapArgs {
    /// Path to the GMAT orbit report to map.
    #[arg(value_name = "ORBIT_FILE")]
    pub orbit_file: PathBuf,

    /// First and last rows of the orbit report to plot.
    #[arg(short, long, num_args = 2, value_names = ["FIRST", "LAST"])]
    pub indices: Option<Vec<usize>>,

    /// Output .kml or .kmz path (default: the orbit file with a .kml
    /// extension).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Google Earth colour for the track, as aabbggrr hex.
    #[arg(short, long)]
    pub colour: Option<String>,

    /// Line width of the track.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Document name shown in Google Earth.
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Fully resolved options for one mapping run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrbitOptions {
    pub indices: [usize; 2],
    pub output: Option<PathBuf>,
    pub colour: String,
    pub width: u32,
    pub name: String,
}

impl OrbitOptions {
    /// Built-in defaults for every orbit-map option.
    pub fn defaults() -> RestrictedMap<String, Value> {
        RestrictedMap::from([
            ("indices".to_string(), json!([0, 2000])),
            ("output".to_string(), Value::Null),
            ("colour".to_string(), json!("FF0000FF")),
            ("width".to_string(), json!(4)),
            ("name".to_string(), json!("GMAT Orbit")),
        ])
    }

    /// Interpret a merged parameter snapshot.
    pub fn from_params(params: IndexMap<String, Value>) -> Result<Self> {
        let object: serde_json::Map<String, Value> = params.into_iter().collect();
        serde_json::from_value(Value::Object(object)).context("invalid orbit-map option value")
    }
}

impl OrbitMapArgs {
    /// The options given on the command line, as parameter overrides.
    pub fn overrides(&self) -> Vec<(String, Value)> {
        let mut overrides = Vec::new();
        if let Some(indices) = &self.indices {
            overrides.push(("indices".to_string(), json!(indices)));
        }
        if let Some(output) = &self.output {
            overrides.push(("output".to_string(), json!(output.to_string_lossy())));
        }
        if let Some(colour) = &self.colour {
            overrides.push(("colour".to_string(), json!(colour)));
        }
        if let Some(width) = self.width {
            overrides.push(("width".to_string(), json!(width)));
        }
        if let Some(name) = &self.name {
            overrides.push(("name".to_string(), json!(name)));
        }
        overrides
    }
}

/// Execute the orbit-map subcommand.
///
/// Returns exit code 0 on success.
pub fn run_orbit_map(args: &OrbitMapArgs, config: &CliConfig) -> Result<u8> {
    let orbit_file = args.orbit_file.as_path();
    let map = |params: IndexMap<String, Value>| -> Result<PathBuf> {
        let options = OrbitOptions::from_params(params)?;
        map_orbit(orbit_file, &options)
    };
    let mut mapper = DefaultsBinder::new(OrbitOptions::defaults(), map);

    mapper
        .defaults_mut()
        .update(config.orbit_map.clone())
        .context("unknown orbit-map setting in config file")?;

    let output = mapper
        .invoke(args.overrides())
        .context("unknown orbit-map option")??;

    println!("File saved as {}", output.display());
    Ok(0)
}

/// Read `orbit_file` and write its ground track as KML, or as KMZ when the
/// output path ends in `.kmz`.
///
/// Returns the path written.
pub fn map_orbit(orbit_file: &Path, options: &OrbitOptions) -> Result<PathBuf> {
    tracing::info!(orbit_file = %orbit_file.display(), "creating map for orbit file");

    if !orbit_file.exists() {
        bail!("orbit file does not exist: {}", orbit_file.display());
    }
    let report = std::fs::read_to_string(orbit_file)
        .with_context(|| format!("failed to read orbit file: {}", orbit_file.display()))?;

    let track = parse_ground_track(&report, options.indices)?;
    if track.is_empty() {
        tracing::warn!(indices = ?options.indices, "no orbit rows selected; track is empty");
    }
    tracing::debug!(points = track.len(), "parsed ground track");

    let file_name = orbit_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let style = LineStyle::new([
        ("id", json!("GroundTrack")),
        ("colour", json!(options.colour)),
        ("width", json!(options.width)),
    ])?;
    let line = LineString::new(
        track,
        [
            ("name", json!("GMAT Orbit Track")),
            (
                "description",
                json!(format!("Ground track for GMAT orbit from file {file_name}")),
            ),
        ],
    )?
    .with_style(style);

    let mut document = KmlDocument::new(options.name.clone(), "");
    document.add_element(line, None)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| orbit_file.with_extension("kml"));
    document
        .write(&output)
        .with_context(|| format!("failed to write KML file: {}", output.display()))?;

    tracing::info!(output = %output.display(), "saved orbit map");
    Ok(output)
}

/// Extract `(lon, lat)` points from a GMAT report.
///
/// Rows `first..=last` with an even zero-based row number are used.
pub fn parse_ground_track(report: &str, [first, last]: [usize; 2]) -> Result<Coordinates> {
    let mut track = Coordinates::new();

    for (row, line) in report.lines().enumerate() {
        if row < first || row > last || row % 2 != 0 {
            continue;
        }

        let mut columns = line.split_whitespace();
        let (Some(lat), Some(lon)) = (columns.next(), columns.next()) else {
            bail!("line {}: expected latitude and longitude, found {line:?}", row + 1);
        };
        let lat: f64 = lat
            .parse()
            .with_context(|| format!("line {}: invalid latitude {lat:?}", row + 1))?;
        let lon: f64 = lon
            .parse()
            .with_context(|| format!("line {}: invalid longitude {lon:?}", row + 1))?;

        track.push((lon, lat));
    }

    Ok(track)
}
