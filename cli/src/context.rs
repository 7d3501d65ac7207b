//! Shared setup for every network-backed command.

use anyhow::{Context as _, Result};
use tome_business::{BusinessConfig, HttpAccountService};
use tracing::{debug, instrument};

pub struct AppContext {
    pub config: BusinessConfig,
    pub service: HttpAccountService,
}

impl AppContext {
    /// Reads `TOME_*` settings and applies the `--api-url` override.
    #[instrument(skip_all, name = "context")]
    pub fn from_env(api_url: Option<&str>) -> Result<Self> {
        let config = BusinessConfig::from_env().context("Failed to load configuration")?;
        Self::new(match api_url {
            Some(url) => config.with_api_base_url(url),
            None => config,
        })
    }

    pub fn new(config: BusinessConfig) -> Result<Self> {
        let service =
            HttpAccountService::new(&config).context("Failed to build the HTTP client")?;
        debug!(api_url = %service.api_url(), "Account service ready");
        Ok(Self { config, service })
    }
}
