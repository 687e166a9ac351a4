//! Key-value persistence port for client-style state.
//!
//! Stores hold plain string keys whose values are JSON arrays of product ids.
//! Readers treat a missing or malformed value as an empty array.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::warn;

use crate::{CatalogError, Result};

pub const FAVORITES_KEY: &str = "favoriteProductIds";
pub const VIEW_HISTORY_KEY: &str = "viewedProductIds";
pub const CART_KEY: &str = "cartProductIds";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: String) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads a JSON array of ids. Never fails: unreadable values come back empty.
pub fn read_ids(store: &dyn KeyValueStore, key: &str) -> Vec<String> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return vec![],
        Err(error) => {
            warn!(key, %error, "key-value read failed, using empty list");
            return vec![];
        }
    };
    serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|error| {
        warn!(key, %error, "malformed id list, using empty list");
        vec![]
    })
}

pub fn encode_ids<I: AsRef<str>>(ids: &[I]) -> Result<String> {
    let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
    Ok(serde_json::to_string(&ids)?)
}

pub fn write_ids<I: AsRef<str>>(store: &dyn KeyValueStore, key: &str, ids: &[I]) -> Result<()> {
    store.set(key, encode_ids(ids)?)
}

/// Namespaces a well-known key under a session.
pub fn session_key(session: &str, key: &str) -> String {
    format!("{session}:{key}")
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().map_err(|_| poisoned())?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}

/// Whole-map JSON file. Every write rewrites the file through a temporary
/// sibling and a rename, blocking the calling thread until it lands. Async
/// callers go through `spawn_blocking`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens `path`, starting empty when the file is missing or unreadable as JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!(path = %path.display(), %error, "storage file is not a JSON object, starting empty");
                HashMap::new()
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => return Err(error.into()),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Storage("storage lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(read_ids(&store, FAVORITES_KEY).is_empty());
    }

    #[test]
    fn test_malformed_value_reads_empty() {
        let store = MemoryStore::new();
        store.set(CART_KEY, "{oops".into()).unwrap();
        assert!(read_ids(&store, CART_KEY).is_empty());
        store.set(CART_KEY, r#"{"a": 1}"#.into()).unwrap();
        assert!(read_ids(&store, CART_KEY).is_empty());
        store.set(CART_KEY, "[1, 2]".into()).unwrap();
        assert!(read_ids(&store, CART_KEY).is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        write_ids(&store, VIEW_HISTORY_KEY, &["3", "1"]).unwrap();
        assert_eq!(store.get(VIEW_HISTORY_KEY).unwrap().as_deref(), Some(r#"["3","1"]"#));
        assert_eq!(read_ids(&store, VIEW_HISTORY_KEY), ["3", "1"]);
        store.remove(VIEW_HISTORY_KEY).unwrap();
        assert!(read_ids(&store, VIEW_HISTORY_KEY).is_empty());
    }

    #[test]
    fn test_session_key() {
        assert_eq!(session_key("abc", CART_KEY), "abc:cartProductIds");
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let path = std::env::temp_dir().join(format!("opensase-courses-{}.json", uuid::Uuid::new_v4()));
        {
            let store = FileStore::open(&path).unwrap();
            write_ids(&store, FAVORITES_KEY, &["7"]).unwrap();
        }
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(read_ids(&reopened, FAVORITES_KEY), ["7"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_tolerates_garbage_file() {
        let path = std::env::temp_dir().join(format!("opensase-courses-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert!(read_ids(&store, FAVORITES_KEY).is_empty());
        std::fs::remove_file(&path).unwrap();
    }
}
