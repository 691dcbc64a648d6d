//! # Configuration File
//!
//! Optional YAML file passed with `--config`. Each top-level section holds
//! default overrides for one subcommand:
//!
//! ```yaml
//! orbit-map:
//!   colour: FF00FF00
//!   width: 2
//!   output: tracks/orbit.kml
//! ```
//!
//! Section contents are not checked here; the subcommand validates them
//! against its own defaults. A relative `output` path is taken relative to
//! the config file's directory.
//!
//! Colours must be quoted when they are all digits (`colour: "00000000"`).
//! Unquoted, YAML reads them as integers and drops leading zeros, so a
//! numeric `colour` is rejected.

use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::resolve_path;

/// Parsed contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Overrides for `geokit orbit-map`.
    #[serde(default, rename = "orbit-map")]
    pub orbit_map: IndexMap<String, Value>,
}

impl CliConfig {
    /// Read and parse the config file at `path`. An empty file is an empty
    /// config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let mut config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse config file: {}", path.display()))?
        };

        if let Some(Value::Number(colour)) = config.orbit_map.get("colour") {
            bail!(
                "orbit-map colour in {} must be a quoted string, not the number {colour}",
                path.display()
            );
        }

        let base = path.parent().unwrap_or(Path::new("."));
        if let Some(Value::String(output)) = config.orbit_map.get_mut("output") {
            *output = resolve_path(Path::new(output.as_str()), base)
                .to_string_lossy()
                .into_owned();
        }

        tracing::debug!(
            path = %path.display(),
            orbit_map_keys = config.orbit_map.len(),
            "loaded config file"
        );
        Ok(config)
    }
}
