//! Persistence - namespaced JSON values over a string key-value backend
//!
//! Keys are stored as `"<namespace>:<key>"` and values as JSON text, so one
//! backend can hold every game's data. Backend failures never reach the
//! controllers: reads fall back to `None` and writes are dropped, both with a
//! `warn!` log line.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key under which each game keeps its best score
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Raw string storage (the terminal stand-in for `localStorage`)
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Process-local storage.
///
/// Clones share the same map, so several stores (one per game) can sit on one
/// backend and tests can inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value stored under the full (namespaced) key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// A single JSON object file mapping full keys to value strings.
///
/// The file is re-read on every access so several processes see each other's
/// writes; a missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).with_context(|| format!("parse {}", self.path.display()))
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, text).with_context(|| format!("write {}", self.path.display()))
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

/// Namespaced, failure-tolerant view over a backend
pub struct GameStore {
    namespace: String,
    backend: Box<dyn KeyValueBackend>,
}

impl GameStore {
    pub fn new(namespace: &str, backend: Box<dyn KeyValueBackend>) -> Self {
        Self {
            namespace: namespace.to_string(),
            backend,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stored value, or `None` when missing, unreadable or of the wrong shape
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let full = self.full_key(key);
        match self.try_get(&full) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("failed to read {}: {:#}", full, e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let full = self.full_key(key);
        let result = serde_json::to_string(value)
            .map_err(anyhow::Error::from)
            .and_then(|raw| self.backend.set_item(&full, &raw));
        if let Err(e) = result {
            log::warn!("failed to write {}: {:#}", full, e);
        }
    }

    pub fn remove(&mut self, key: &str) {
        let full = self.full_key(key);
        if let Err(e) = self.backend.remove_item(&full) {
            log::warn!("failed to remove {}: {:#}", full, e);
        }
    }
}

/// A game's persisted best score
pub struct HighScore {
    store: GameStore,
    value: u32,
}

impl HighScore {
    /// Read the stored best; missing or invalid data counts as 0
    pub fn load(store: GameStore) -> Self {
        let value = store.get::<u32>(HIGH_SCORE_KEY).unwrap_or(0);
        Self { store, value }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Record `score` if it beats the best; returns the (possibly new) best
    pub fn offer(&mut self, score: u32) -> u32 {
        if score > self.value {
            self.value = score;
            self.store.set(HIGH_SCORE_KEY, &score);
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl KeyValueBackend for Unavailable {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            anyhow::bail!("storage disabled")
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("quota exceeded")
        }
        fn remove_item(&mut self, _key: &str) -> Result<()> {
            anyhow::bail!("storage disabled")
        }
    }

    #[test]
    fn test_keys_are_namespaced() {
        let backend = MemoryBackend::new();
        let mut store = GameStore::new("snake", Box::new(backend.clone()));
        store.set("highScore", &120u32);

        assert_eq!(backend.raw("snake:highScore").as_deref(), Some("120"));
        assert_eq!(store.get::<u32>("highScore"), Some(120));
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let backend = MemoryBackend::new();
        let mut a = GameStore::new("2048", Box::new(backend.clone()));
        let b = GameStore::new("tictactoe", Box::new(backend.clone()));
        a.set(HIGH_SCORE_KEY, &64u32);

        assert_eq!(b.get::<u32>(HIGH_SCORE_KEY), None);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_remove_deletes_value() {
        let backend = MemoryBackend::new();
        let mut store = GameStore::new("ns", Box::new(backend.clone()));
        store.set("k", "v");
        store.remove("k");
        assert_eq!(store.get::<String>("k"), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_malformed_value_reads_as_none() {
        let mut backend = MemoryBackend::new();
        backend.set_item("ns:highScore", "not json").unwrap();
        let store = GameStore::new("ns", Box::new(backend));
        assert_eq!(store.get::<u32>("highScore"), None);
    }

    #[test]
    fn test_failing_backend_is_tolerated() {
        let mut store = GameStore::new("ns", Box::new(Unavailable));
        store.set("highScore", &5u32);
        store.remove("highScore");
        assert_eq!(store.get::<u32>("highScore"), None);
    }

    #[test]
    fn test_high_score_defaults_and_persists() {
        let mut backend = MemoryBackend::new();
        backend.set_item("ns:highScore", "-3").unwrap();
        let mut high = HighScore::load(GameStore::new("ns", Box::new(backend.clone())));
        assert_eq!(high.get(), 0);

        assert_eq!(high.offer(40), 40);
        assert_eq!(high.offer(10), 40);
        assert_eq!(backend.raw("ns:highScore").as_deref(), Some("40"));

        let reloaded = HighScore::load(GameStore::new("ns", Box::new(backend)));
        assert_eq!(reloaded.get(), 40);
    }

    #[test]
    fn test_json_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut backend = JsonFileBackend::new(&path);
        assert_eq!(backend.get_item("a:b").unwrap(), None);
        backend.set_item("a:b", "7").unwrap();
        backend.set_item("c:d", "\"x\"").unwrap();
        assert_eq!(backend.get_item("a:b").unwrap().as_deref(), Some("7"));

        backend.remove_item("a:b").unwrap();
        assert_eq!(backend.get_item("a:b").unwrap(), None);
        assert_eq!(backend.get_item("c:d").unwrap().as_deref(), Some("\"x\""));
    }

    #[test]
    fn test_json_file_backend_corrupt_file_errors() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ nope").unwrap();

        let backend = JsonFileBackend::new(file.path());
        assert!(backend.get_item("a:b").is_err());
        let store = GameStore::new("a", Box::new(backend));
        assert_eq!(store.get::<u32>("b"), None);
    }
}
