use crate::core::TokenStore;
use crate::utils::error::{ClientError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Process-local store, the stand-in for browser storage in tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(key: &str, token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), token.to_string());
        }
        store
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries.lock().map_err(|_| ClientError::StorageError {
            message: "memory store poisoned".to_string(),
        })
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// JSON object on disk, re-read on every access so separate processes see each other's writes.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| ClientError::StorageError {
            message: format!("{} is not a valid store file: {}", self.path.display(), e),
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        tracing::debug!("Writing {} to {}", key, self.path.display());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            tracing::debug!("Removing {} from {}", key, self.path.display());
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::with_token("token", "abc123");
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);

        // removing a missing key is not an error
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state").join("storage.json");

        FileTokenStore::new(&path).set("token", "abc123").unwrap();
        assert!(path.exists());

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc123"));

        reopened.remove("token").unwrap();
        assert_eq!(FileTokenStore::new(&path).get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_keeps_unrelated_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("storage.json"));

        store.set("theme", "dark").unwrap();
        store.set("token", "abc123").unwrap();
        store.remove("token").unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("nothing.json"));
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let err = FileTokenStore::new(&path).get("token").unwrap_err();
        assert!(matches!(err, ClientError::StorageError { .. }));
    }
}
