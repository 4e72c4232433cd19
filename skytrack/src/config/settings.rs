//! Settings structs mirroring the sections of `config.ini`.

use std::time::Duration;

use crate::coordinator::{
    CoordinatorConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_VIEWPORT_QUIET_SECS,
};
use crate::region::{
    BoundingBox, Credentials, OpenSkyConfig, DEFAULT_OPENSKY_URL, DEFAULT_TIMEOUT_SECS,
};

/// Complete user configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub opensky: OpenSkySettings,
    pub polling: PollingSettings,
    pub region: RegionSettings,
}

/// `[opensky]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSkySettings {
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for OpenSkySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENSKY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            username: None,
            password: None,
        }
    }
}

/// `[polling]` section. Values in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingSettings {
    pub interval: u64,
    pub viewport_quiet: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL_SECS,
            viewport_quiet: DEFAULT_VIEWPORT_QUIET_SECS,
        }
    }
}

/// `[region]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSettings {
    pub bounds: BoundingBox,
}

impl ConfigFile {
    /// Client configuration. Credentials are used only when both parts are set.
    pub fn opensky_config(&self) -> OpenSkyConfig {
        let config = OpenSkyConfig::new(self.opensky.base_url.clone())
            .with_timeout(Duration::from_secs(self.opensky.timeout));

        match (&self.opensky.username, &self.opensky.password) {
            (Some(username), Some(password)) => {
                config.with_credentials(Credentials::new(username, password))
            }
            _ => config,
        }
    }

    /// Coordinator configuration.
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig::default()
            .with_initial_bounds(self.region.bounds)
            .with_poll_interval(Duration::from_secs(self.polling.interval))
            .with_viewport_quiet_interval(Duration::from_secs(self.polling.viewport_quiet))
    }
}
