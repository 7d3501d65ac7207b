//! Saved session file for the CLI.
//!
//! Stores the login token in `$XDG_CONFIG_HOME/tome/config.toml` (or the
//! platform equivalent) as:
//!
//! ```toml
//! [auth]
//! token = "..."
//! email = "alice@example.com"
//! nickname = "alice01"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tome_business::{Session, SessionState};

/// CLI configuration stored on disk
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Authentication section
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication configuration
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Saved bearer token
    pub token: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
}

impl Config {
    /// Returns `$XDG_CONFIG_HOME/tome/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "tomelater", "tome")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or the default configuration if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn has_token(&self) -> bool {
        self.auth.token.is_some()
    }

    /// Copies the signed-in user out of `session`. An anonymous session
    /// clears the saved credentials.
    pub fn store_session(&mut self, session: &Session) {
        match session.snapshot() {
            SessionState::Authenticated { token, user } => {
                self.auth = AuthConfig {
                    token: Some(token),
                    email: Some(user.email),
                    nickname: Some(user.nickname),
                };
            }
            SessionState::Anonymous => self.clear_auth(),
        }
    }

    pub fn clear_auth(&mut self) {
        self.auth = AuthConfig::default();
    }
}
