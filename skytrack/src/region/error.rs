//! Error types for region queries.

use thiserror::Error;

/// Errors that can occur when fetching aircraft for a region.
///
/// Malformed rows are never an error; they are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Upstream rejected the credentials (HTTP 401/403).
    #[error("Upstream rejected authentication")]
    Unauthorized,

    /// Upstream is throttling requests (HTTP 429).
    #[error("Upstream rate limit exceeded")]
    RateLimited,

    /// Connection failure, timeout or unreadable response.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success status.
    #[error("Upstream returned HTTP {0}")]
    Upstream(u16),
}

impl FetchError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FetchError::Unauthorized,
            429 => FetchError::RateLimited,
            code => FetchError::Upstream(code),
        }
    }

    /// Message suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Unauthorized => {
                "Flight data service rejected the credentials".to_string()
            }
            FetchError::RateLimited => {
                "Too many requests to the flight data service, try again shortly".to_string()
            }
            FetchError::Network(_) => {
                "Could not reach the flight data service, check your connection".to_string()
            }
            FetchError::Upstream(code) => {
                format!("Flight data service is unavailable (HTTP {})", code)
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Network("request timed out".to_string())
        } else if let Some(status) = e.status() {
            FetchError::from_status(status.as_u16())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(FetchError::from_status(401), FetchError::Unauthorized);
        assert_eq!(FetchError::from_status(403), FetchError::Unauthorized);
        assert_eq!(FetchError::from_status(429), FetchError::RateLimited);
        assert_eq!(FetchError::from_status(500), FetchError::Upstream(500));
        assert_eq!(FetchError::from_status(404), FetchError::Upstream(404));
    }

    #[test]
    fn test_user_messages_are_not_empty() {
        let errors = [
            FetchError::Unauthorized,
            FetchError::RateLimited,
            FetchError::Network("connection refused".to_string()),
            FetchError::Upstream(503),
        ];
        for error in errors {
            assert!(!error.user_message().is_empty());
        }
        assert!(FetchError::Upstream(503).user_message().contains("503"));
    }

    #[test]
    fn test_display_keeps_diagnostics() {
        let err = FetchError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
