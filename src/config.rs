//! Configuration management for Streamify
//!
//! Config is stored at ~/.config/streamify/config.toml. Every field is
//! optional; the TMDB API key may also come from `TMDB_API_KEY`, which wins
//! over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::tmdb::DEFAULT_BASE_URL;
use crate::player::PlayerType;

/// Environment variable holding the TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("No TMDB API key. Set TMDB_API_KEY or tmdb_api_key in the config file.")]
    MissingApiKey,
}

/// Application configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// TMDB API root, overridable for proxies and tests
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Search input quiet period in milliseconds
    pub debounce_ms: u64,
    /// Query searched at startup
    pub initial_query: String,
    /// Start in dark mode
    pub dark_mode: bool,
    /// Player used for trailers
    pub player: PlayerType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            debounce_ms: 500,
            initial_query: "avengers".to_string(),
            dark_mode: false,
            player: PlayerType::default(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("tmdb_api_key", &self.tmdb_api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("debounce_ms", &self.debounce_ms)
            .field("initial_query", &self.initial_query)
            .field("dark_mode", &self.dark_mode)
            .field("player", &self.player)
            .finish()
    }
}

impl Config {
    /// Get config file path (~/.config/streamify/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamify").join("config.toml"))
    }

    /// Load config.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the API key from the environment, then the file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    /// Key resolution with an explicit environment value; blanks don't count
    pub fn api_key_with_env(&self, env: Option<String>) -> Result<String, ConfigError> {
        env.into_iter()
            .chain(self.tmdb_api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Per-request timeout; zero is raised to one second
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
