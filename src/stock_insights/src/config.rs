//! Client configuration: file loading, environment overrides, defaults.
//!
//! Resolution order, later wins:
//! 1. Built-in defaults ([`DEFAULT_BASE_URL`], no timeout, platform preference path)
//! 2. An optional TOML file (`--config`)
//! 3. Environment variables [`ENV_API_URL`], [`ENV_TIMEOUT_SECS`], [`ENV_PREFS`]
//!
//! Loading normalizes the result: the base URL is trimmed of whitespace and
//! trailing slashes, and a zero timeout is treated as "no timeout".
//!
//! Example file:
//! ```toml
//! base_url = "https://egx.example.com/api"
//! timeout_secs = 15
//! preferences_path = "/home/me/.config/stock-insights/preferences.toml"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use shared_utils::env::{InvalidEnvVarError, get_env_var_opt, parse_env_var_opt};
use thiserror::Error;

/// API root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

pub const ENV_API_URL: &str = "STOCK_INSIGHTS_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "STOCK_INSIGHTS_TIMEOUT_SECS";
pub const ENV_PREFS: &str = "STOCK_INSIGHTS_PREFS";

/// Directory under the platform config dir holding the preference file.
pub const APP_DIR: &str = "stock-insights";
pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Env(#[from] InvalidEnvVarError),

    #[error("base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// Preference file location. `None` uses [`default_preferences_path`].
    pub preferences_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            preferences_path: None,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration: optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.normalize()?;
        Ok(config)
    }

    /// Parses a TOML string without consulting the environment.
    pub fn from_toml_str(s: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.normalize()?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = get_env_var_opt(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(secs) = parse_env_var_opt::<u64>(ENV_TIMEOUT_SECS)? {
            self.timeout_secs = Some(secs);
        }
        if let Some(path) = get_env_var_opt(ENV_PREFS) {
            self.preferences_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        self.base_url = trimmed.to_string();
        if self.timeout_secs == Some(0) {
            self.timeout_secs = None;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Where preferences are read from and written to.
    ///
    /// Falls back to a file in the working directory when the platform has
    /// no config dir.
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .or_else(default_preferences_path)
            .unwrap_or_else(|| PathBuf::from(PREFERENCES_FILE))
    }
}

/// `<config_dir>/stock-insights/preferences.toml`, if the platform has a config dir.
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILE))
}
