//! SkyTrack CLI - live aircraft positions from the OpenSky Network.
//!
//! This binary is a thin front end over the `skytrack` library: it resolves
//! configuration from `~/.skytrack/config.ini` and command-line flags, then
//! runs a one-shot fetch or a polling session.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skytrack::config::MAX_INTERVAL_SECS;
use skytrack::region::BoundingBox;

use commands::common::CredentialArgs;

#[derive(Parser)]
#[command(name = "skytrack")]
#[command(version, about = "Live aircraft positions from the OpenSky Network", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.skytrack/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// OpenSky account username (overrides config)
    #[arg(long, global = true)]
    username: Option<String>,

    /// OpenSky account password (overrides config)
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file at ~/.skytrack/config.ini
    Init,

    /// Fetch the aircraft in a region once and print them
    Fetch {
        /// Region as "min_lat,min_lon,max_lat,max_lon" (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        bounds: Option<BoundingBox>,
    },

    /// Keep polling a region and print every update until Ctrl+C
    Watch {
        /// Region as "min_lat,min_lon,max_lat,max_lon" (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        bounds: Option<BoundingBox>,

        /// Seconds between periodic refreshes (overrides config)
        #[arg(
            long,
            value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_SECS)
        )]
        interval: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let credentials = CredentialArgs {
        username: cli.username,
        password: cli.password,
    };

    let result = match cli.command {
        Commands::Init => commands::init::run(cli.config),
        Commands::Fetch { bounds } => commands::fetch::run(commands::fetch::FetchArgs {
            config: cli.config,
            credentials,
            bounds,
        }),
        Commands::Watch { bounds, interval } => {
            commands::watch::run(commands::watch::WatchArgs {
                config: cli.config,
                credentials,
                bounds,
                interval,
            })
        }
    };

    if let Err(e) = result {
        e.exit();
    }
}
