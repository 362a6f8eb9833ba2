// Transport configuration for building the reqwest::Client.
//
// The cloud API is reached over plain HTTPS with public certificates,
// so the only knobs are the base URL and the request timeout.

use std::time::Duration;

use url::Url;

use crate::constants::{BASE_URL, USER_AGENT};
use crate::error::Error;

/// Where and how the client talks to the Elmax Cloud API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root. Endpoint paths are appended as path segments.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Limit for establishing the TCP/TLS connection. Capped by `timeout`.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a custom base URL (a staging host or a mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connect timeout.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// Idle connections are never kept, so every call opens a fresh
    /// connection for its own duration. The connect phase has its own
    /// deadline, never longer than the request timeout, so an unreachable
    /// host fails as a connect error.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout.min(self.timeout))
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(Error::Transport)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_cloud() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://cloud.elmaxsrl.it/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn rejects_urls_without_a_path_base() {
        let result = ClientConfig::with_base_url("mailto:someone@example.com");
        assert!(matches!(result, Err(Error::InvalidBaseUrl { .. })));
    }

    #[test]
    fn rejects_unparseable_urls() {
        let result = ClientConfig::with_base_url("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn timeout_override() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9")
            .unwrap()
            .timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.build_client().is_ok());
    }
}
