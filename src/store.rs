//! Persistent key-value store.
//!
//! The viewer persists exactly two string values: the theme preference and
//! the streak record. [`KeyValueStore`] is the seam; [`JsonFileStore`] keeps
//! the pairs in a single JSON object on disk and [`MemoryStore`] keeps them
//! in memory for tests and throwaway sessions.
//!
//! ## Storage
//!
//! ```json
//! {
//!   "mossStreak": "{\"lastVisit\":\"2026-03-02T08:15:00+01:00\",\"streak\":4}",
//!   "mossTheme": "dark"
//! }
//! ```
//!
//! A missing or unparsable file loads as an empty store, the same way a
//! browser with cleared storage looks to the page. Each `set` rewrites the
//! whole file, which is atomic enough at the granularity of one key.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "mossTheme";
/// Key holding the serialized streak record.
pub const STREAK_KEY: &str = "mossStreak";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-to-string storage that survives across sessions.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by one JSON object in a file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. Never fails: an absent or corrupt file
    /// yields an empty store that will be rewritten on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("ignoring unreadable store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::open(tmp.path().join("store.json"));
        assert_eq!(store.get(STREAK_KEY), None);
    }

    #[test]
    fn file_store_round_trips_across_opens() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");

        let mut store = JsonFileStore::open(&path);
        store.set(THEME_KEY, "dark").unwrap();
        store.set(STREAK_KEY, "{}").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(reopened.get(STREAK_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/store.json");

        let mut store = JsonFileStore::open(&path);
        store.set(THEME_KEY, "light").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_store_corrupt_file_loads_empty_and_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        fs::write(&path, "not json {{{").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(THEME_KEY), None);

        store.set(THEME_KEY, "dark").unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn setting_one_key_leaves_the_other_alone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");

        let mut store = JsonFileStore::open(&path);
        store.set(STREAK_KEY, "payload").unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(THEME_KEY, "light").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(STREAK_KEY).as_deref(), Some("payload"));
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
    }
}
