//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! gateway URL, request timeout, where tokens are persisted, and the last
//! email used to log in.
//!
//! Configuration is stored at `~/.config/talentbase/config.json`. The
//! `TALENTBASE_API_URL` and `TALENTBASE_TOKEN_STORAGE` environment variables
//! override the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::transport::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::auth::{FileBackend, KeyringBackend, MemoryBackend, TokenBackend};

/// Application name used for config/data directory paths
const APP_NAME: &str = "talentbase";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Gateway used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const ENV_API_URL: &str = "TALENTBASE_API_URL";
pub const ENV_TOKEN_STORAGE: &str = "TALENTBASE_TOKEN_STORAGE";

/// Where the credential pair is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    /// JSON file in the user data directory
    #[default]
    File,
    /// OS keychain
    Keyring,
    /// Not persisted across runs
    Memory,
}

impl std::str::FromStr for TokenStorage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(TokenStorage::File),
            "keyring" => Ok(TokenStorage::Keyring),
            "memory" => Ok(TokenStorage::Memory),
            other => Err(anyhow::anyhow!("Unknown token storage: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub token_storage: TokenStorage,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_storage: TokenStorage::default(),
            last_email: None,
        }
    }
}

impl Config {
    /// Load from the config file (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(storage) = var(ENV_TOKEN_STORAGE) {
            self.token_storage = storage.parse()?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Storage backend for the persisted credential pair.
    pub fn token_backend(&self) -> Result<Box<dyn TokenBackend>> {
        Ok(match self.token_storage {
            TokenStorage::File => Box::new(FileBackend::new(self.data_dir()?)),
            TokenStorage::Keyring => Box::new(KeyringBackend::new()),
            TokenStorage::Memory => Box::new(MemoryBackend::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.token_storage, TokenStorage::File);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_url: "https://api.talentbase.dev".into(),
            last_email: Some("a@b.com".into()),
            token_storage: TokenStorage::Keyring,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, "https://api.talentbase.dev");
        assert_eq!(loaded.last_email.as_deref(), Some("a@b.com"));
        assert_eq!(loaded.token_storage, TokenStorage::Keyring);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"last_email": "x@y.com"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.last_email.as_deref(), Some("x@y.com"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(|key| match key {
                ENV_API_URL => Some("http://gateway:9000".into()),
                ENV_TOKEN_STORAGE => Some("Memory".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.api_url, "http://gateway:9000");
        assert_eq!(config.token_storage, TokenStorage::Memory);

        let mut config = Config::default();
        let err = config.apply_env(|key| (key == ENV_TOKEN_STORAGE).then(|| "vault".to_string()));
        assert!(err.is_err());
    }
}
