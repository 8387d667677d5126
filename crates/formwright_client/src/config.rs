//! Canonical defaults and configuration for the API clients.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by every collaborator client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Read the base URL from `FORMWRIGHT_API_URL`, falling back to the
    /// local default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FORMWRIGHT_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join a path onto the base URL. `path` must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = ApiConfig::new("https://api.example.edu/v1/");
        assert_eq!(
            config.url("/forms/abc/history"),
            "https://api.example.edu/v1/forms/abc/history"
        );
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = ApiConfig::new("https://api.example.edu///");
        assert_eq!(config.base_url(), "https://api.example.edu");
    }

    #[test]
    fn test_default_timeout() {
        let config = ApiConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
