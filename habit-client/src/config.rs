//! Client configuration

use std::path::PathBuf;

/// Default API root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the habit API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the session credential is persisted between runs.
    /// `None` keeps the session in memory only.
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            session_path: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `HABIT_API_URL` (default [`DEFAULT_BASE_URL`])
    /// - `HABIT_API_TIMEOUT_SECS` (default 30, invalid values fall back)
    /// - `HABIT_SESSION_PATH` (optional)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("HABIT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("HABIT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let session_path = std::env::var("HABIT_SESSION_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            base_url,
            timeout,
            session_path,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session credential at `path`
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://127.0.0.1:9000")
            .with_timeout(5)
            .with_session_path("/tmp/session.json");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, 5);
        assert_eq!(
            config.session_path.as_deref(),
            Some(std::path::Path::new("/tmp/session.json"))
        );
    }

    #[test]
    fn test_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.session_path.is_none());
    }
}
