//! Common types and utilities shared across CLI commands.

use std::time::Duration;

use skytrack::aircraft::AircraftState;
use skytrack::config::ConfigFile;
use skytrack::coordinator::CoordinatorConfig;
use skytrack::region::{BoundingBox, Credentials, OpenSkyConfig};

use crate::error::CliError;

/// Credential flags shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct CredentialArgs {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Resolve client settings from CLI args and config.
///
/// Each credential part comes from the CLI if given, else from config. Having
/// only one of the two parts is an error rather than a silent anonymous query.
pub fn resolve_opensky_config(
    cli: &CredentialArgs,
    config: &ConfigFile,
) -> Result<OpenSkyConfig, CliError> {
    let username = cli
        .username
        .clone()
        .or_else(|| config.opensky.username.clone());
    let password = cli
        .password
        .clone()
        .or_else(|| config.opensky.password.clone());

    let opensky = OpenSkyConfig::new(config.opensky.base_url.clone())
        .with_timeout(Duration::from_secs(config.opensky.timeout));

    match (username, password) {
        (Some(username), Some(password)) => {
            Ok(opensky.with_credentials(Credentials::new(username, password)))
        }
        (None, None) => Ok(opensky),
        (Some(_), None) => Err(CliError::Config(
            "username given without password. Use --password or set password in config.ini"
                .to_string(),
        )),
        (None, Some(_)) => Err(CliError::Config(
            "password given without username. Use --username or set username in config.ini"
                .to_string(),
        )),
    }
}

/// Resolve the region to query: CLI takes precedence, then config.
pub fn resolve_bounds(cli_bounds: Option<BoundingBox>, config: &ConfigFile) -> BoundingBox {
    cli_bounds.unwrap_or(config.region.bounds)
}

/// Resolve coordinator settings from CLI args and config.
pub fn resolve_coordinator_config(
    cli_bounds: Option<BoundingBox>,
    cli_interval: Option<u64>,
    config: &ConfigFile,
) -> CoordinatorConfig {
    let mut coordinator = config
        .coordinator_config()
        .with_initial_bounds(resolve_bounds(cli_bounds, config));

    if let Some(secs) = cli_interval {
        coordinator = coordinator.with_poll_interval(Duration::from_secs(secs));
    }

    coordinator
}

/// Table header matching [`format_row`].
pub fn table_header() -> String {
    format!(
        "{:<8} {:<9} {:<20} {:>9} {:>10} {:>8} {:>7} {:>5} {:>3}",
        "ICAO24", "CALLSIGN", "COUNTRY", "LAT", "LON", "ALT m", "SPD m/s", "HDG", "GND"
    )
}

/// One table row per aircraft. Absent values print as `-`.
pub fn format_row(aircraft: &AircraftState) -> String {
    let (lat, lon) = match aircraft.position {
        Some(p) => (format!("{:.4}", p.latitude), format!("{:.4}", p.longitude)),
        None => ("-".to_string(), "-".to_string()),
    };

    format!(
        "{:<8} {:<9} {:<20} {:>9} {:>10} {:>8} {:>7} {:>5} {:>3}",
        aircraft.transponder_id,
        aircraft.callsign.as_deref().map(str::trim).unwrap_or("-"),
        truncate(&aircraft.origin_country, 20),
        lat,
        lon,
        optional(aircraft.altitude_m, 0),
        optional(aircraft.velocity_mps, 1),
        optional(aircraft.heading_deg, 0),
        if aircraft.on_ground { "yes" } else { "" },
    )
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars - 1).chain(std::iter::once('…')).collect()
    }
}
