//! Watch command - run the polling coordinator and print each update.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use skytrack::coordinator::{PollingCoordinator, ViewState};
use skytrack::region::{BoundingBox, OpenSkyClient};
use tokio_util::sync::CancellationToken;

use super::common::{resolve_coordinator_config, resolve_opensky_config, CredentialArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the watch command.
pub struct WatchArgs {
    pub config: Option<PathBuf>,
    pub credentials: CredentialArgs,
    pub bounds: Option<BoundingBox>,
    pub interval: Option<u64>,
}

/// Run the watch command.
pub fn run(args: WatchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config)?;
    runner.log_startup("watch");
    let config = runner.config();

    let opensky = resolve_opensky_config(&args.credentials, config)?;
    let coordinator_config = resolve_coordinator_config(args.bounds, args.interval, config);
    let client = OpenSkyClient::new(opensky)?;

    println!("SkyTrack v{}", env!("CARGO_PKG_VERSION"));
    println!("=============");
    println!();
    println!("Region:   {}", coordinator_config.initial_bounds);
    println!(
        "Interval: {}s",
        coordinator_config.poll_interval.as_secs()
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up signal handler for graceful shutdown
    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();

    ctrlc::set_handler(move || {
        signal.cancel();
    })
    .map_err(|e| CliError::Runtime(format!("Failed to set signal handler: {}", e)))?;

    let summary = runner.runtime().block_on(async {
        let coordinator = PollingCoordinator::start(client, coordinator_config);
        let mut rx = coordinator.subscribe();
        let mut printer = UpdatePrinter::default();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = rx.borrow_and_update().clone();
                    if let Some(line) = printer.observe(&state) {
                        println!("{}", line);
                    }
                }
            }
        }

        println!();
        println!("Received shutdown signal, stopping...");
        coordinator.shutdown().await;
        printer
    });

    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Successful updates: {}", summary.updates);
    println!("  Failed updates:     {}", summary.failures);
    Ok(())
}

/// Turns view state changes into one printed line per fetch outcome.
///
/// Loading transitions and selection changes print nothing. Every failed
/// fetch is counted, but consecutive identical errors are printed once.
#[derive(Debug, Default)]
struct UpdatePrinter {
    last_updated: Option<DateTime<Utc>>,
    /// Last error line printed.
    last_error: Option<String>,
    was_loading: bool,
    updates: usize,
    failures: usize,
}

impl UpdatePrinter {
    fn observe(&mut self, state: &ViewState) -> Option<String> {
        let resolved = self.was_loading && !state.is_loading;
        self.was_loading = state.is_loading;

        if state.last_updated != self.last_updated {
            self.last_updated = state.last_updated;
            self.last_error = None;
            let updated = state.last_updated?;
            self.updates += 1;

            let bounds = state
                .bounds
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string());
            return Some(format!(
                "[{}] {} aircraft ({} positioned) in {}",
                updated.with_timezone(&Local).format("%H:%M:%S"),
                state.aircraft.len(),
                state.positioned().count(),
                bounds
            ));
        }

        match &state.last_error {
            // A change of message without an observed loading phase is still
            // a new failure; the watch channel may coalesce intermediate states.
            Some(error) if resolved || self.last_error.as_ref() != Some(error) => {
                self.failures += 1;
                if self.last_error.as_ref() == Some(error) {
                    return None;
                }
                self.last_error = Some(error.clone());
                Some(format!(
                    "[{}] {} {} (showing {} aircraft from last update)",
                    Local::now().format("%H:%M:%S"),
                    console::style("Error:").red(),
                    error,
                    state.aircraft.len()
                ))
            }
            _ => None,
        }
    }
}
