//! Key-value persistence
//!
//! The browser build writes straight to LocalStorage; everything else (native
//! runs, tests) uses an in-memory map. Writes are synchronous and treated as
//! always succeeding. Reads that fail to parse are treated as absent.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String-keyed store of string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    /// Read an integer, `None` if absent or unparsable
    fn get_u64(&self, key: &str) -> Option<u64> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring malformed integer under '{}': {:?}", key, raw);
                None
            }
        }
    }

    fn set_u64(&mut self, key: &str, value: u64) {
        self.set(key, &value.to_string());
    }

    /// Read a JSON value, `None` if absent or unparsable
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed JSON under '{}': {}", key, e);
                None
            }
        }
    }

    fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.set(key, &json);
        }
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress will not be saved");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_round_trip_and_garbage() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_u64("n"), None);
        store.set_u64("n", 42);
        assert_eq!(store.get_u64("n"), Some(42));
        store.set("n", "forty-two");
        assert_eq!(store.get_u64("n"), None);
        store.set("n", "-3");
        assert_eq!(store.get_u64("n"), None);
    }

    #[test]
    fn test_json_garbage_is_absent() {
        let mut store = MemoryStore::new();
        store.set("list", "[\"a\", ");
        assert_eq!(store.get_json::<Vec<String>>("list"), None);
        store.set_json("list", &["a", "b"]);
        assert_eq!(
            store.get_json::<Vec<String>>("list"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}
