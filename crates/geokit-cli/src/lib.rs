//! # geokit-cli — Command-Line Tools
//!
//! Provides the `geokit` binary.
//!
//! ## Subcommands
//!
//! - `geokit orbit-map` — Turn a GMAT orbit report into a KML ground track.
//!
//! ```bash
//! geokit orbit-map ReportFile1.txt -i 0 4000 -c FF00FF00 -w 2 -n "Orbit 1"
//! geokit --config geokit.yaml orbit-map ReportFile1.txt -o tracks/orbit1.kml
//! ```
//!
//! ## Option Precedence
//!
//! Built-in defaults, then the config file, then command-line flags. Every
//! layer is applied through a `RestrictedMap`, so a setting the subcommand
//! does not know is reported instead of ignored.

pub mod config;
pub mod orbit;

use std::path::{Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
