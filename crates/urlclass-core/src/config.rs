//! Application configuration management.
//!
//! Two layers live here:
//!
//! - `Config`: optional defaults persisted at
//!   `~/.config/urlclass/config.json` (base URL, endpoints, batching and the
//!   last used username). Secrets are never written to this file.
//! - `RunConfig`: the fully resolved settings for one invocation, built once
//!   by the caller and passed to [`crate::run`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::client::MAX_CHUNK_SIZE;
use crate::api::ApiSettings;
use crate::auth::Credentials;

/// Application name used for config directory paths
const APP_NAME: &str = "urlclass";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub auth_endpoint: Option<String>,
    pub lookup_endpoint: Option<String>,
    pub session_cookie: Option<String>,
    pub last_username: Option<String>,
    pub chunk_size: Option<usize>,
    pub chunk_delay_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// API settings from this file, with built-in defaults for anything unset.
    pub fn api_settings(&self) -> ApiSettings {
        let defaults = ApiSettings::default();
        ApiSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            auth_endpoint: self.auth_endpoint.clone().unwrap_or(defaults.auth_endpoint),
            lookup_endpoint: self
                .lookup_endpoint
                .clone()
                .unwrap_or(defaults.lookup_endpoint),
            session_cookie: self.session_cookie.clone().unwrap_or(defaults.session_cookie),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            chunk_delay: self
                .chunk_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.chunk_delay),
            request_timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .or(defaults.request_timeout),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No base URL configured (use --base-url or URLCLASS_BASE_URL)")]
    MissingBaseUrl,

    #[error("No username configured (use --username or URLCLASS_USERNAME)")]
    MissingUsername,

    #[error("No {0} available")]
    MissingSecret(&'static str),

    #[error("Chunk size must be between 1 and {max}, got {size}")]
    InvalidChunkSize { size: usize, max: usize },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Everything one run needs. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api: ApiSettings,
    pub credentials: Credentials,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.credentials.username.trim().is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if self.credentials.password.is_empty() {
            return Err(ConfigError::MissingSecret("password"));
        }
        if self.credentials.api_key.is_empty() {
            return Err(ConfigError::MissingSecret("API key"));
        }
        if !(1..=MAX_CHUNK_SIZE).contains(&self.api.chunk_size) {
            return Err(ConfigError::InvalidChunkSize {
                size: self.api.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        if self.api.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config() -> RunConfig {
        RunConfig {
            api: ApiSettings::new("https://api.example.com/api/v1"),
            credentials: Credentials::new("admin@example.com", "hunter2", "abcdefghijkl"),
            input: PathBuf::from("urls.csv"),
            output: PathBuf::from("results.csv"),
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            base_url: Some("https://api.example.com/api/v1".to_string()),
            last_username: Some("admin@example.com".to_string()),
            chunk_size: Some(50),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chunk_delay_secs": 5}"#).unwrap();

        let settings = Config::load_from(&path).unwrap().api_settings();
        assert_eq!(settings.chunk_delay, Duration::from_secs(5));
        assert_eq!(settings.chunk_size, 100);
        assert_eq!(settings.auth_endpoint, "authenticatedSession");
        assert_eq!(settings.lookup_endpoint, "urlLookup");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(run_config().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_values() {
        let mut config = run_config();
        config.api.base_url = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingBaseUrl));

        let mut config = run_config();
        config.credentials.username.clear();
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));

        let mut config = run_config();
        config.credentials.api_key.clear();
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret("API key")));
    }

    #[test]
    fn test_timeout_unset_by_default() {
        let settings = Config::default().api_settings();
        assert_eq!(settings.request_timeout, None);

        let config = Config {
            request_timeout_secs: Some(120),
            ..Default::default()
        };
        assert_eq!(config.api_settings().request_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"base_url": "http://x", "request_timeout_secs": 0}"#).unwrap();

        let mut config = run_config();
        config.api = Config::load_from(&path).unwrap().api_settings();
        assert_eq!(config.api.request_timeout, Some(Duration::ZERO));
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        config.api.request_timeout = Some(Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_chunk_size_bounds() {
        let mut config = run_config();
        config.api.chunk_size = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidChunkSize { size: 0, max: 100 })
        );
        config.api.chunk_size = 101;
        assert!(config.validate().is_err());
        config.api.chunk_size = 100;
        assert!(config.validate().is_ok());
    }
}
