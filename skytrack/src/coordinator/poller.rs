//! Polling coordinator - decides when to fetch and applies the outcome.
//!
//! The coordinator owns one spawned task running a `select!` loop over:
//!
//! - commands from the UI (viewport changes, interaction state, refreshes)
//! - the periodic deadline, armed only while idle
//! - the single in-flight fetch, polled only while fetching
//! - the cancellation token
//!
//! Because the fetch future lives inside the loop, at most one fetch is ever
//! in flight and results are applied in completion order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::config::CoordinatorConfig;
use super::view_state::ViewState;
use crate::aircraft::AircraftState;
use crate::region::{BoundingBox, FetchError, RegionClient};

type FetchFuture = BoxFuture<'static, Result<Vec<AircraftState>, FetchError>>;

/// Deadline used when the configured interval does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Requests from the UI collaborator to the poll loop.
#[derive(Debug, Clone, Copy)]
enum Command {
    Viewport(BoundingBox),
    Interacting(bool),
    Refresh { force: bool },
}

/// What caused a fetch to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Startup,
    Viewport,
    Periodic,
    Manual,
    Forced,
}

/// Keeps a [`ViewState`] in sync with a [`RegionClient`].
///
/// # Usage
///
/// ```ignore
/// let client = OpenSkyClient::new(OpenSkyConfig::default())?;
/// let coordinator = PollingCoordinator::start(client, CoordinatorConfig::default());
///
/// let mut rx = coordinator.subscribe();
/// while rx.changed().await.is_ok() {
///     let state = rx.borrow_and_update().clone();
///     println!("{} aircraft", state.aircraft.len());
/// }
/// ```
///
/// Dropping the coordinator cancels its task; [`shutdown`](Self::shutdown)
/// additionally waits for the task to finish.
pub struct PollingCoordinator {
    commands: mpsc::UnboundedSender<Command>,
    state: Arc<watch::Sender<ViewState>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollingCoordinator {
    /// Spawn the poll loop and dispatch the startup fetch.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<C: RegionClient + 'static>(client: C, config: CoordinatorConfig) -> Self {
        let (state_tx, _) = watch::channel(ViewState::default());
        let state = Arc::new(state_tx);
        let (commands, command_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let poll_loop = PollLoop::new(Arc::new(client), config, Arc::clone(&state));
        let handle = tokio::spawn(poll_loop.run(command_rx, cancel.clone()));

        Self {
            commands,
            state,
            cancel,
            handle: Some(handle),
        }
    }

    /// Report a new visible region.
    ///
    /// The region always becomes the target of later fetches. A fetch is
    /// dispatched right away only if the viewport is not being manipulated,
    /// no fetch is in flight and the quiet interval since the previous
    /// viewport-triggered fetch has elapsed.
    pub fn trigger_viewport_refresh(&self, bounds: BoundingBox) {
        self.send(Command::Viewport(bounds));
    }

    /// Report whether the user is currently dragging or zooming the map.
    pub fn set_interacting(&self, interacting: bool) {
        self.send(Command::Interacting(interacting));
    }

    /// Refresh now, unless a fetch is already in flight.
    pub fn trigger_manual_refresh(&self) {
        self.send(Command::Refresh { force: false });
    }

    /// Refresh now. An in-flight fetch is abandoned and replaced.
    pub fn force_refresh(&self) {
        self.send(Command::Refresh { force: true });
    }

    /// Select the aircraft with the given transponder id, or clear the
    /// selection with `None`. Unknown ids clear the selection.
    pub fn select(&self, transponder_id: Option<&str>) {
        self.state.send_if_modified(|state| state.select(transponder_id));
    }

    /// Subscribe to view state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Cancel the poll loop and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Polling coordinator task failed");
            }
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::debug!(?command, "Polling coordinator stopped, command dropped");
        }
    }
}

impl Drop for PollingCoordinator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// State owned by the spawned task.
struct PollLoop<C> {
    client: Arc<C>,
    config: CoordinatorConfig,
    state: Arc<watch::Sender<ViewState>>,

    /// Target of the next fetch; updated by every viewport trigger.
    bounds: BoundingBox,
    interacting: bool,
    last_viewport_fetch: Option<Instant>,
    next_tick: Instant,
    in_flight: Option<FetchFuture>,
    dispatched_at: Option<Instant>,
}

impl<C: RegionClient + 'static> PollLoop<C> {
    fn new(
        client: Arc<C>,
        config: CoordinatorConfig,
        state: Arc<watch::Sender<ViewState>>,
    ) -> Self {
        let bounds = config.initial_bounds;
        let next_tick = deadline_after(config.poll_interval);
        Self {
            client,
            config,
            state,
            bounds,
            interacting: false,
            last_viewport_fetch: None,
            next_tick,
            in_flight: None,
            dispatched_at: None,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        cancel: CancellationToken,
    ) {
        tracing::info!(
            bounds = %self.bounds,
            poll_interval_secs = self.config.poll_interval.as_secs_f64(),
            viewport_quiet_secs = self.config.viewport_quiet_interval.as_secs_f64(),
            "Polling coordinator started"
        );

        self.dispatch(Trigger::Startup);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,

                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },

                _ = tokio::time::sleep_until(self.next_tick), if self.in_flight.is_none() => {
                    self.on_tick();
                }

                result = wait_in_flight(&mut self.in_flight), if self.in_flight.is_some() => {
                    self.complete(result);
                }
            }
        }

        if self.in_flight.take().is_some() {
            tracing::debug!("Abandoning in-flight fetch on shutdown");
        }
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });

        tracing::info!("Polling coordinator stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Viewport(bounds) => self.on_viewport(bounds),
            Command::Interacting(interacting) => {
                tracing::trace!(interacting, "Viewport interaction changed");
                self.interacting = interacting;
            }
            Command::Refresh { force: false } if self.in_flight.is_some() => {
                tracing::debug!("Manual refresh coalesced with in-flight fetch");
            }
            Command::Refresh { force } => {
                self.dispatch(if force { Trigger::Forced } else { Trigger::Manual });
            }
        }
    }

    fn on_viewport(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;

        if self.interacting {
            tracing::trace!(bounds = %bounds, "Viewport trigger skipped: interacting");
            return;
        }
        if self.in_flight.is_some() {
            tracing::trace!(bounds = %bounds, "Viewport trigger skipped: fetch in flight");
            return;
        }

        let now = Instant::now();
        if let Some(last) = self.last_viewport_fetch {
            let elapsed = now.duration_since(last);
            if elapsed < self.config.viewport_quiet_interval {
                tracing::trace!(
                    bounds = %bounds,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Viewport trigger skipped: within quiet interval"
                );
                return;
            }
        }

        self.last_viewport_fetch = Some(now);
        self.dispatch(Trigger::Viewport);
    }

    fn on_tick(&mut self) {
        self.next_tick = deadline_after(self.config.poll_interval);

        if self.interacting {
            tracing::trace!("Periodic refresh skipped: interacting");
            return;
        }

        self.dispatch(Trigger::Periodic);
    }

    fn dispatch(&mut self, trigger: Trigger) {
        let bounds = self.bounds;

        if self.in_flight.is_some() {
            tracing::debug!(?trigger, "Replacing in-flight fetch");
        }

        let client = Arc::clone(&self.client);
        self.in_flight = Some(Box::pin(async move { client.fetch(&bounds).await }));
        self.dispatched_at = Some(Instant::now());
        self.state.send_modify(|state| state.begin_fetch(bounds));

        tracing::debug!(?trigger, bounds = %bounds, "Region fetch dispatched");
    }

    fn complete(&mut self, result: Result<Vec<AircraftState>, FetchError>) {
        self.in_flight = None;
        self.next_tick = deadline_after(self.config.poll_interval);

        let elapsed_ms = self
            .dispatched_at
            .take()
            .map(|at| at.elapsed().as_millis() as u64)
            .unwrap_or_default();

        match result {
            Ok(aircraft) => {
                tracing::debug!(aircraft = aircraft.len(), elapsed_ms, "Region fetch succeeded");
                self.state
                    .send_modify(|state| state.apply_success(aircraft, Utc::now()));
            }
            Err(e) => {
                tracing::warn!(error = %e, elapsed_ms, "Region fetch failed");
                self.state.send_modify(|state| state.apply_failure(&e));
            }
        }
    }
}

/// `now + interval`, saturating to a far-future deadline instead of overflowing.
fn deadline_after(interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(interval)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// Resolve the in-flight fetch, or never if there is none.
///
/// Dropping this future leaves the fetch in place for the next loop iteration.
async fn wait_in_flight(
    in_flight: &mut Option<FetchFuture>,
) -> Result<Vec<AircraftState>, FetchError> {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}
