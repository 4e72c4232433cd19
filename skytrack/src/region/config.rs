//! Configuration for the OpenSky region client.

use std::fmt;
use std::time::Duration;

/// Default OpenSky REST API root.
pub const DEFAULT_OPENSKY_URL: &str = "https://opensky-network.org/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// OpenSky account credentials (HTTP basic auth).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration for [`OpenSkyClient`](super::OpenSkyClient).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSkyConfig {
    /// API root, without the `states/all` path.
    pub base_url: String,

    /// Whole-request timeout. Expiry surfaces as a network error.
    pub timeout: Duration,

    /// Optional account; anonymous access when `None`.
    pub credentials: Option<Credentials>,
}

impl OpenSkyConfig {
    /// Create a config for a custom API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set account credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Full URL of the states endpoint.
    pub fn states_url(&self) -> String {
        format!("{}/states/all", self.base_url.trim_end_matches('/'))
    }
}

impl Default for OpenSkyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENSKY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: None,
        }
    }
}
