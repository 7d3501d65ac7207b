//! Client configuration for the account service.
//!
//! Values come from the environment (`TOME_API_BASE_URL`,
//! `TOME_REQUEST_TIMEOUT_SECS`) and fall back to the local development backend.

use std::env::vars;
use std::time::Duration;

use log::info;
use serde::Deserialize;

/// Base URL of the backend when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9410";

/// Request timeout applied to every backend call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while loading [`BusinessConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Loads the configuration from `TOME_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(vars())
    }

    /// Loads the configuration from an explicit set of variables.
    ///
    /// Only keys prefixed with `TOME_` are considered.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(k, v)| {
                k.as_ref()
                    .strip_prefix("TOME_")
                    .map(|key| (key.to_owned(), v.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let api_base_url = match raw.api_base_url {
            Some(url) if !url.trim().is_empty() => {
                info!("Using provided TOME_API_BASE_URL: {url}");
                url.trim().trim_end_matches('/').to_owned()
            }
            _ => DEFAULT_API_BASE_URL.to_owned(),
        };

        let request_timeout = match raw.request_timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }

    /// Overrides the base URL, e.g. from a `--api-url` flag. Blank values are
    /// ignored.
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            url.clone_into(&mut self.api_base_url);
        }
        self
    }

    /// Root of the REST API, e.g. `http://localhost:9410/api`.
    pub fn api_url(&self) -> String {
        if self.api_base_url.is_empty() {
            "/api".to_owned()
        } else {
            format!("{}/api", self.api_base_url)
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_api_base_url() {
        let config = BusinessConfig::default().with_api_base_url(" https://tome.example/ ");
        assert_eq!(config.api_url(), "https://tome.example/api");

        let config = config.with_api_base_url("  ");
        assert_eq!(config.api_base_url, "https://tome.example");
    }

    #[test]
    fn test_default_points_at_local_backend() {
        let config = BusinessConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:9410");
        assert_eq!(config.api_url(), "http://localhost:9410/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_base_url_uses_relative_api() {
        let config = BusinessConfig::new("");
        assert_eq!(config.api_url(), "/api");
    }

    #[test]
    fn test_from_vars_reads_prefixed_keys() {
        let config = BusinessConfig::from_vars([
            ("TOME_API_BASE_URL", "https://tome.example.com/"),
            ("TOME_REQUEST_TIMEOUT_SECS", "3"),
            ("API_BASE_URL", "https://ignored.example.com"),
        ])
        .expect("config should load");

        assert_eq!(config.api_base_url, "https://tome.example.com");
        assert_eq!(config.api_url(), "https://tome.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_from_vars_without_keys_uses_defaults() {
        let config = BusinessConfig::from_vars(Vec::<(String, String)>::new())
            .expect("config should load");
        assert_eq!(config, BusinessConfig::default());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = BusinessConfig::from_vars([("TOME_REQUEST_TIMEOUT_SECS", "0")]);
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }
}
