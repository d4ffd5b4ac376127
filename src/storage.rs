//! Preference storage
//!
//! File-backed key/value store on native platforms, in-memory fallback on
//! WASM. Values live as one file per key under the platform data directory.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

/// In-memory store used on WASM, keyed by store scope.
#[allow(dead_code)]
static MEMORY_STORE: Lazy<Mutex<HashMap<String, HashMap<String, String>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to create storage directory: {0}")]
    CreateDir(std::io::Error),

    #[error("failed to write key {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("storage backend unavailable")]
    Unavailable,
}

/// Handle to one preference store. Cheap to clone; clones share the same
/// underlying location.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct PrefStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl PrefStore {
    /// Store rooted at the platform data directory.
    pub fn open() -> Self {
        let dir = match dirs::data_local_dir() {
            Some(data_dir) => data_dir.join("nightjar").join("prefs"),
            None => PathBuf::from("cache").join("prefs"),
        };
        Self { dir }
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.dir.join(format!("{}.json", sanitize_key(key)));
        fs::read_to_string(path).ok()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(StorageError::CreateDir)?;
        let path = self.dir.join(format!("{}.json", sanitize_key(key)));
        fs::write(path, value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.dir.join(format!("{}.json", sanitize_key(key)));
        if path.exists() {
            fs::remove_file(path).map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct PrefStore {
    scope: String,
}

#[cfg(target_arch = "wasm32")]
impl PrefStore {
    pub fn open() -> Self {
        Self {
            scope: "nightjar".to_string(),
        }
    }

    pub fn at(scope: impl Into<String>) -> Self {
        Self { scope: scope.into() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let store = MEMORY_STORE.lock().ok()?;
        store.get(&self.scope)?.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = MEMORY_STORE.lock().map_err(|_| StorageError::Unavailable)?;
        let scope = store.entry(self.scope.clone()).or_default();
        scope.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut store = MEMORY_STORE.lock().map_err(|_| StorageError::Unavailable)?;
        if let Some(scope) = store.get_mut(&self.scope) {
            scope.remove(key);
        }
        Ok(())
    }
}

/// Sanitize a storage key for filesystem use.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("theme"), "theme");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());

        store.set("theme", "light").expect("set");
        assert_eq!(store.get("theme"), Some("light".to_string()));

        store.delete("theme").expect("delete");
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());
        assert_eq!(store.get("nonexistent"), None);
    }
}
