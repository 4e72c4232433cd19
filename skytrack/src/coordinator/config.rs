//! Configuration for the polling coordinator.

use std::time::Duration;

use crate::region::BoundingBox;

/// Default periodic refresh cadence in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default minimum quiet interval between viewport-triggered fetches, in seconds.
pub const DEFAULT_VIEWPORT_QUIET_SECS: u64 = 2;

/// Configuration for the [`PollingCoordinator`](super::PollingCoordinator).
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    /// How long after a fetch resolves the next periodic fetch is due.
    pub poll_interval: Duration,

    /// Minimum time between the starts of two viewport-triggered fetches.
    pub viewport_quiet_interval: Duration,

    /// Region for the unconditional startup fetch.
    pub initial_bounds: BoundingBox,
}

impl CoordinatorConfig {
    /// Set the startup region.
    pub fn with_initial_bounds(mut self, bounds: BoundingBox) -> Self {
        self.initial_bounds = bounds;
        self
    }

    /// Set the periodic refresh cadence.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the viewport quiet interval.
    pub fn with_viewport_quiet_interval(mut self, interval: Duration) -> Self {
        self.viewport_quiet_interval = interval;
        self
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            viewport_quiet_interval: Duration::from_secs(DEFAULT_VIEWPORT_QUIET_SECS),
            initial_bounds: BoundingBox::ISTANBUL,
        }
    }
}
