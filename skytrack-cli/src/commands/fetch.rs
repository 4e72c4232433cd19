//! Fetch command - query a region once and print the aircraft table.

use std::path::PathBuf;

use skytrack::region::{BoundingBox, OpenSkyClient, RegionClient};

use super::common::{
    format_row, resolve_bounds, resolve_opensky_config, table_header, CredentialArgs,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub config: Option<PathBuf>,
    pub credentials: CredentialArgs,
    pub bounds: Option<BoundingBox>,
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config)?;
    runner.log_startup("fetch");
    let config = runner.config();

    let opensky = resolve_opensky_config(&args.credentials, config)?;
    let bounds = resolve_bounds(args.bounds, config);
    let authenticated = opensky.credentials.is_some();

    let client = OpenSkyClient::new(opensky)?;
    let mut aircraft = runner.runtime().block_on(client.fetch(&bounds))?;
    aircraft.sort_by(|a, b| a.transponder_id.cmp(&b.transponder_id));

    println!("Region: {}", bounds);
    println!(
        "Access: {}",
        if authenticated { "authenticated" } else { "anonymous" }
    );
    println!();

    if aircraft.is_empty() {
        println!("No aircraft reported in this region.");
        return Ok(());
    }

    println!("{}", console::style(table_header()).bold());
    for state in &aircraft {
        println!("{}", format_row(state));
    }

    let positioned = aircraft.iter().filter(|a| a.has_position()).count();
    println!();
    println!("{} aircraft ({} with position)", aircraft.len(), positioned);
    Ok(())
}
