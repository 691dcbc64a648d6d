//! # geokit CLI entry point
//!
//! Parses command-line arguments, loads the optional config file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geokit_cli::config::CliConfig;
use geokit_cli::orbit::{run_orbit_map, OrbitMapArgs};

/// geokit: Google Earth maps from mission analysis output.
///
/// Turns GMAT orbit reports into KML/KMZ ground tracks. Every subcommand
/// starts from built-in defaults, which a YAML file given with `--config`
/// and then the command-line flags override. A setting the subcommand does
/// not know is an error, never silently ignored.
#[derive(Parser, Debug)]
#[command(name = "geokit", version, about)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Map a GMAT orbit report to a KML ground track.
    OrbitMap(OrbitMapArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .init();

    tracing::debug!("geokit CLI starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::OrbitMap(args) => run_orbit_map(&args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `-v` count to log level: warn, info, debug, then trace.
fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<CliConfig> {
    match path {
        Some(path) => CliConfig::load(path),
        None => Ok(CliConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_filter(0).to_string(), "warn");
        assert_eq!(log_filter(1).to_string(), "info");
        assert_eq!(log_filter(2).to_string(), "debug");
        assert_eq!(log_filter(7).to_string(), "trace");
    }

    #[test]
    fn about_describes_config_layering() {
        let about = Cli::command().render_long_help().to_string();
        assert!(about.contains("--config"));
        assert!(about.contains("KML/KMZ ground tracks"));
    }

    #[test]
    fn orbit_map_arguments_parse() {
        let cli = Cli::try_parse_from([
            "geokit", "-vv", "orbit-map", "report.txt", "-i", "10", "20", "-o", "out.kmz",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::OrbitMap(args) = cli.command;
        assert_eq!(args.indices, Some(vec![10, 20]));
        assert_eq!(args.output, Some(PathBuf::from("out.kmz")));
    }
}
