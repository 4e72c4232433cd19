//! Integration tests for the Polling Coordinator.
//!
//! These tests drive the coordinator through its public API with a scripted
//! region client and a paused Tokio clock:
//! - single-flight behavior for manual and forced refreshes
//! - viewport debounce and interaction suppression
//! - periodic cadence
//! - last-known-good preservation and selection re-validation
//!
//! Run with: `cargo test --test coordinator_integration`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, Semaphore};

use skytrack::aircraft::AircraftState;
use skytrack::coordinator::{CoordinatorConfig, PollingCoordinator, ViewState};
use skytrack::region::{BoundingBox, FetchError, RegionClient};

// ============================================================================
// Helper Functions
// ============================================================================

type FetchResult = Result<Vec<AircraftState>, FetchError>;

/// Region client replaying scripted results, optionally held behind a gate.
///
/// Without a gate every fetch resolves on first poll. With a gate each fetch
/// waits for one permit before taking its result.
struct ScriptedClient {
    calls: AtomicUsize,
    requests: Mutex<Vec<BoundingBox>>,
    results: Mutex<VecDeque<FetchResult>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedClient {
    fn new(results: Vec<FetchResult>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            results: Mutex::new(results.into()),
            gate: None,
        })
    }

    fn gated(results: Vec<FetchResult>, gate: Arc<Semaphore>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            results: Mutex::new(results.into()),
            gate: Some(gate),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<BoundingBox> {
        self.requests.lock().unwrap().clone()
    }
}

impl RegionClient for ScriptedClient {
    async fn fetch(&self, bbox: &BoundingBox) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(*bbox);

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn aircraft(id: &str, altitude: f64) -> AircraftState {
    let mut state = AircraftState::new(id, "Turkey")
        .with_callsign(format!("THY{}", id))
        .with_position(41.0, 29.0);
    state.altitude_m = Some(altitude);
    state
}

fn europe() -> BoundingBox {
    BoundingBox::new(35.0, -10.0, 60.0, 25.0)
}

fn alps() -> BoundingBox {
    BoundingBox::new(45.0, 5.0, 48.0, 12.0)
}

async fn wait_for(
    rx: &mut watch::Receiver<ViewState>,
    predicate: impl FnMut(&ViewState) -> bool,
) -> ViewState {
    let state = rx.wait_for(predicate).await.expect("coordinator stopped");
    (*state).clone()
}

/// Start a coordinator and wait for the startup fetch to resolve.
async fn start_settled(
    client: Arc<ScriptedClient>,
) -> (PollingCoordinator, watch::Receiver<ViewState>) {
    let coordinator = PollingCoordinator::start(client, CoordinatorConfig::default());
    let mut rx = coordinator.subscribe();
    wait_for(&mut rx, |s| s.last_updated.is_some() || s.last_error.is_some()).await;
    (coordinator, rx)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ============================================================================
// Integration Tests
// ============================================================================

/// A manual refresh during an in-flight fetch must not start a second one.
#[tokio::test(start_paused = true)]
async fn test_manual_refresh_is_coalesced_while_fetching() {
    let gate = Arc::new(Semaphore::new(0));
    let client = ScriptedClient::gated(vec![Ok(vec![aircraft("a", 1000.0)])], Arc::clone(&gate));
    let coordinator = PollingCoordinator::start(Arc::clone(&client), CoordinatorConfig::default());
    let mut rx = coordinator.subscribe();

    settle().await;
    assert_eq!(client.calls(), 1);
    assert!(coordinator.snapshot().is_loading);

    coordinator.trigger_manual_refresh();
    coordinator.trigger_manual_refresh();
    settle().await;
    assert_eq!(client.calls(), 1);

    gate.add_permits(1);
    let state = wait_for(&mut rx, |s| !s.is_loading).await;
    assert_eq!(state.aircraft.len(), 1);
    assert_eq!(client.calls(), 1);

    // Once idle, a manual refresh dispatches again.
    coordinator.trigger_manual_refresh();
    settle().await;
    assert_eq!(client.calls(), 2);

    gate.add_permits(1);
    coordinator.shutdown().await;
}

/// A forced refresh replaces the in-flight fetch instead of running beside it.
#[tokio::test(start_paused = true)]
async fn test_force_refresh_replaces_in_flight_fetch() {
    let gate = Arc::new(Semaphore::new(0));
    let client = ScriptedClient::gated(
        vec![Ok(vec![aircraft("a", 1000.0), aircraft("b", 2000.0)])],
        Arc::clone(&gate),
    );
    let coordinator = PollingCoordinator::start(Arc::clone(&client), CoordinatorConfig::default());
    let mut rx = coordinator.subscribe();

    settle().await;
    coordinator.force_refresh();
    settle().await;
    assert_eq!(client.calls(), 2);
    assert!(coordinator.snapshot().is_loading);

    // Only the replacement is still waiting on the gate.
    gate.add_permits(1);
    let state = wait_for(&mut rx, |s| !s.is_loading).await;
    assert_eq!(state.aircraft.len(), 2);
    assert_eq!(gate.available_permits(), 0);

    coordinator.shutdown().await;
}

/// A failing fetch keeps the previous aircraft and surfaces an error.
#[tokio::test(start_paused = true)]
async fn test_failure_preserves_last_known_good() {
    let client = ScriptedClient::new(vec![
        Ok(vec![aircraft("a", 1000.0), aircraft("b", 2000.0), aircraft("c", 3000.0)]),
        Err(FetchError::Upstream(503)),
        Ok(vec![aircraft("d", 4000.0)]),
    ]);
    let (coordinator, mut rx) = start_settled(Arc::clone(&client)).await;
    assert_eq!(coordinator.snapshot().aircraft.len(), 3);

    coordinator.trigger_manual_refresh();
    let state = wait_for(&mut rx, |s| s.last_error.is_some()).await;
    assert_eq!(state.aircraft.len(), 3);
    assert!(!state.is_loading);
    assert_eq!(state.last_error, Some(FetchError::Upstream(503).user_message()));

    // The next success clears the error.
    coordinator.trigger_manual_refresh();
    let state = wait_for(&mut rx, |s| s.last_error.is_none() && !s.is_loading).await;
    assert_eq!(state.aircraft.len(), 1);
    assert_eq!(state.aircraft[0].transponder_id, "d");

    coordinator.shutdown().await;
}

/// Selection survives a refresh only if the aircraft is still present.
#[tokio::test(start_paused = true)]
async fn test_selection_is_revalidated_after_refresh() {
    let client = ScriptedClient::new(vec![
        Ok(vec![aircraft("a", 1000.0), aircraft("b", 2000.0)]),
        Ok(vec![aircraft("b", 2500.0), aircraft("a", 1500.0)]),
        Err(FetchError::RateLimited),
        Ok(vec![aircraft("b", 3000.0)]),
    ]);
    let (coordinator, mut rx) = start_settled(Arc::clone(&client)).await;

    coordinator.select(Some("a"));
    assert_eq!(coordinator.snapshot().selected.unwrap().altitude_m, Some(1000.0));

    // Still present: selection points at the updated record.
    coordinator.trigger_manual_refresh();
    let state = wait_for(&mut rx, |s| !s.is_loading && s.aircraft[0].transponder_id == "b").await;
    assert_eq!(state.selected.unwrap().altitude_m, Some(1500.0));

    // Failure: selection kept.
    coordinator.trigger_manual_refresh();
    let state = wait_for(&mut rx, |s| s.last_error.is_some()).await;
    assert_eq!(state.selected.unwrap().transponder_id, "a");

    // Gone: selection cleared.
    coordinator.trigger_manual_refresh();
    let state = wait_for(&mut rx, |s| !s.is_loading && s.aircraft.len() == 1).await;
    assert!(state.selected.is_none());

    coordinator.shutdown().await;
}

/// Viewport triggers closer together than the quiet interval produce one fetch.
#[tokio::test(start_paused = true)]
async fn test_viewport_triggers_within_quiet_interval_are_debounced() {
    let client = ScriptedClient::new(Vec::new());
    let (coordinator, _rx) = start_settled(Arc::clone(&client)).await;
    assert_eq!(client.calls(), 1);

    coordinator.trigger_viewport_refresh(europe());
    tokio::time::sleep(Duration::from_millis(500)).await;
    coordinator.trigger_viewport_refresh(alps());
    settle().await;

    assert_eq!(client.requests(), vec![BoundingBox::ISTANBUL, europe()]);

    coordinator.shutdown().await;
}

/// Viewport triggers further apart than the quiet interval each fetch.
#[tokio::test(start_paused = true)]
async fn test_viewport_triggers_after_quiet_interval_both_fetch() {
    let client = ScriptedClient::new(Vec::new());
    let (coordinator, _rx) = start_settled(Arc::clone(&client)).await;

    coordinator.trigger_viewport_refresh(europe());
    tokio::time::sleep(Duration::from_secs(3)).await;
    coordinator.trigger_viewport_refresh(alps());
    settle().await;

    assert_eq!(client.requests(), vec![BoundingBox::ISTANBUL, europe(), alps()]);
    assert_eq!(coordinator.snapshot().bounds, Some(alps()));

    coordinator.shutdown().await;
}

/// A viewport change during a fetch is neither dispatched nor queued; it only
/// retargets the next periodic fetch.
#[tokio::test(start_paused = true)]
async fn test_viewport_trigger_dropped_while_fetching() {
    let gate = Arc::new(Semaphore::new(0));
    let client = ScriptedClient::gated(Vec::new(), Arc::clone(&gate));
    let coordinator = PollingCoordinator::start(Arc::clone(&client), CoordinatorConfig::default());
    let mut rx = coordinator.subscribe();

    settle().await;
    coordinator.trigger_viewport_refresh(europe());
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(client.calls(), 1);

    gate.add_permits(1);
    wait_for(&mut rx, |s| !s.is_loading).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(client.calls(), 1);
    assert_eq!(coordinator.snapshot().bounds, Some(BoundingBox::ISTANBUL));

    // Next periodic tick, 10 s after completion, uses the recorded region.
    gate.add_permits(1);
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(client.requests(), vec![BoundingBox::ISTANBUL, europe()]);

    coordinator.shutdown().await;
}

/// While the map is being dragged, viewport changes only update the target
/// region; the next periodic tick fetches it.
#[tokio::test(start_paused = true)]
async fn test_viewport_trigger_suppressed_while_interacting() {
    let client = ScriptedClient::new(Vec::new());
    let (coordinator, _rx) = start_settled(Arc::clone(&client)).await;

    coordinator.set_interacting(true);
    coordinator.trigger_viewport_refresh(europe());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(client.calls(), 1);

    coordinator.set_interacting(false);
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(client.requests(), vec![BoundingBox::ISTANBUL, europe()]);

    coordinator.shutdown().await;
}

/// The periodic timer fires every interval after the previous fetch resolves.
#[tokio::test(start_paused = true)]
async fn test_periodic_refresh_cadence() {
    let client = ScriptedClient::new(Vec::new());
    let (coordinator, _rx) = start_settled(Arc::clone(&client)).await;

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert_eq!(client.calls(), 1);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(client.calls(), 2);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(client.calls(), 3);

    coordinator.shutdown().await;
}

/// Ticks arriving during interaction are skipped, not queued.
#[tokio::test(start_paused = true)]
async fn test_periodic_refresh_skipped_while_interacting() {
    let client = ScriptedClient::new(Vec::new());
    let (coordinator, _rx) = start_settled(Arc::clone(&client)).await;

    coordinator.set_interacting(true);
    tokio::time::sleep(Duration::from_secs(35)).await;
    assert_eq!(client.calls(), 1);

    coordinator.set_interacting(false);
    settle().await;
    assert_eq!(client.calls(), 1);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(client.calls(), 2);

    coordinator.shutdown().await;
}

/// No periodic tick fires while a fetch is in flight, however long it takes.
#[tokio::test(start_paused = true)]
async fn test_periodic_timer_disarmed_while_fetching() {
    let gate = Arc::new(Semaphore::new(0));
    let client = ScriptedClient::gated(Vec::new(), Arc::clone(&gate));
    let coordinator = PollingCoordinator::start(Arc::clone(&client), CoordinatorConfig::default());
    let mut rx = coordinator.subscribe();

    settle().await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(client.calls(), 1);

    gate.add_permits(1);
    wait_for(&mut rx, |s| !s.is_loading).await;
    assert_eq!(client.calls(), 1);

    coordinator.shutdown().await;
}
