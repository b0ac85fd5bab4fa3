//! Durable key-value storage for the persisted credential pair.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

const SERVICE_NAME: &str = "talentbase";

/// Token file name in the data directory
const TOKEN_FILE: &str = "tokens.json";

/// The two fixed storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    Access,
    Refresh,
}

impl TokenKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access_token",
            TokenKey::Refresh => "refresh_token",
        }
    }
}

/// Synchronous key-value storage that survives restarts.
pub trait TokenBackend: Send + Sync {
    fn get(&self, key: TokenKey) -> Option<String>;
    fn set(&self, key: TokenKey, value: &str) -> Result<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: TokenKey) -> Result<()>;
}

/// Process-lifetime storage. Used by tests and `memory` mode.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<TokenKey, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenBackend for MemoryBackend {
    fn get(&self, key: TokenKey) -> Option<String> {
        self.values().get(&key).cloned()
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        self.values().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        self.values().remove(&key);
        Ok(())
    }
}

/// Tokens stored as a small JSON object on disk.
pub struct FileBackend {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read token file")?;
        serde_json::from_str(&contents).context("Failed to parse token file")
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<()> {
        let path = self.token_path();
        if values.is_empty() {
            if path.exists() {
                std::fs::remove_file(&path).context("Failed to remove token file")?;
            }
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir).context("Failed to create token directory")?;
        let contents = serde_json::to_string_pretty(values)?;
        std::fs::write(&path, contents).context("Failed to write token file")?;
        Ok(())
    }
}

impl TokenBackend for FileBackend {
    fn get(&self, key: TokenKey) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match self.read_all() {
            Ok(mut values) => values.remove(key.as_str()),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.as_str().to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.read_all().unwrap_or_default();
        values.remove(key.as_str());
        self.write_all(&values)
    }
}

/// Tokens stored in the OS keychain, one entry per key.
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, key: TokenKey) -> Result<Entry> {
        Entry::new(&self.service, key.as_str()).context("Failed to create keyring entry")
    }
}

/// A missing entry is an absent token; any other keychain error is a failure.
fn stored_password(result: keyring::Result<String>) -> Result<Option<String>> {
    match result {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e).context("Failed to read token from keychain"),
    }
}

impl Default for KeyringBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBackend for KeyringBackend {
    fn get(&self, key: TokenKey) -> Option<String> {
        let read = self
            .entry(key)
            .and_then(|entry| stored_password(entry.get_password()));
        match read {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Treating unreadable keychain entry as absent");
                None
            }
        }
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .context("Failed to store token in keychain")
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keychain_missing_entry_is_absent() {
        assert_eq!(stored_password(Ok("AT1".into())).unwrap().as_deref(), Some("AT1"));
        assert_eq!(stored_password(Err(keyring::Error::NoEntry)).unwrap(), None);
    }

    #[test]
    fn test_keychain_failure_is_reported() {
        let locked = keyring::Error::NoStorageAccess("keychain is locked".into());
        let err = stored_password(Err(locked)).unwrap_err();
        assert!(err.to_string().contains("Failed to read token from keychain"));
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get(TokenKey::Access), None);

        backend.set(TokenKey::Access, "AT1").unwrap();
        backend.set(TokenKey::Refresh, "RT1").unwrap();
        assert_eq!(backend.get(TokenKey::Access).as_deref(), Some("AT1"));
        assert_eq!(backend.get(TokenKey::Refresh).as_deref(), Some("RT1"));

        backend.remove(TokenKey::Access).unwrap();
        backend.remove(TokenKey::Access).unwrap();
        assert_eq!(backend.get(TokenKey::Access), None);
        assert_eq!(backend.get(TokenKey::Refresh).as_deref(), Some("RT1"));
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let backend = FileBackend::new(dir.path().to_path_buf());
        backend.set(TokenKey::Access, "AT1").unwrap();
        backend.set(TokenKey::Refresh, "RT1").unwrap();

        let reopened = FileBackend::new(dir.path().to_path_buf());
        assert_eq!(reopened.get(TokenKey::Access).as_deref(), Some("AT1"));
        assert_eq!(reopened.get(TokenKey::Refresh).as_deref(), Some("RT1"));

        let raw = std::fs::read_to_string(dir.path().join(TOKEN_FILE)).unwrap();
        assert!(raw.contains("\"access_token\""));
    }

    #[test]
    fn test_file_backend_removes_file_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));

        backend.set(TokenKey::Access, "AT1").unwrap();
        assert!(dir.path().join("nested").join(TOKEN_FILE).exists());

        backend.remove(TokenKey::Access).unwrap();
        backend.remove(TokenKey::Refresh).unwrap();
        assert!(!dir.path().join("nested").join(TOKEN_FILE).exists());
        assert_eq!(backend.get(TokenKey::Access), None);
    }

    #[test]
    fn test_file_backend_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKEN_FILE), "not json").unwrap();

        let backend = FileBackend::new(dir.path().to_path_buf());
        assert_eq!(backend.get(TokenKey::Access), None);

        backend.set(TokenKey::Access, "AT2").unwrap();
        assert_eq!(backend.get(TokenKey::Access).as_deref(), Some("AT2"));
    }
}
