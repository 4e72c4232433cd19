//! Polling coordinator and synchronized view state.
//!
//! # State Machine
//!
//! ```text
//! Idle --[startup | viewport (eligible) | tick (eligible) | manual]--> Fetching
//! Fetching --[fetch resolves]--> Idle
//! Fetching --[force refresh]--> Fetching (previous fetch abandoned)
//! ```
//!
//! Eligibility:
//!
//! - **Viewport**: not interacting, not fetching, quiet interval elapsed since
//!   the previous viewport-triggered fetch started
//! - **Tick**: not interacting; the timer is only armed while idle and is
//!   re-armed when a fetch resolves
//! - **Manual**: not fetching (otherwise coalesced)
//!
//! # Failure Handling
//!
//! A failed fetch never clears the aircraft set. It only updates
//! `last_error` and the loading flag; the next eligible trigger retries.

mod config;
mod poller;
mod view_state;

pub use config::{CoordinatorConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_VIEWPORT_QUIET_SECS};
pub use poller::PollingCoordinator;
pub use view_state::ViewState;
