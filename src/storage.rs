use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::types::Scores;

/// String key-value store the controller persists tallies into.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store. Used by tests and when the browser refuses `localStorage`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.items.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Only meaningful inside a browser; wasm imports are not callable natively.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no global `window` exists".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }
}

/// Reads tallies stored under `key`.
/// Absent, unreadable, or malformed data all yield zeroed scores.
pub fn load_scores(store: &dyn KeyValueStore, key: &str) -> Scores {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored scores");
            return Scores::default();
        }
        Err(err) => {
            warn!(%err, "could not read stored scores");
            return Scores::default();
        }
    };

    match parse_scores(&raw) {
        Some(scores) => scores,
        None => {
            warn!(key, "ignoring malformed stored scores");
            Scores::default()
        }
    }
}

pub fn save_scores(
    store: &mut dyn KeyValueStore,
    key: &str,
    scores: &Scores,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(scores)?;
    store.set_item(key, &raw)
}

// Only a JSON object counts; arrays would otherwise map onto the fields positionally.
fn parse_scores(raw: &str) -> Option<Scores> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ticTacToeScores";

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                reason: "quota".to_string(),
            })
        }

        fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota".to_string(),
            })
        }
    }

    #[test]
    fn missing_key_loads_zeroed_scores() {
        let store = MemoryStore::new();

        assert_eq!(load_scores(&store, KEY), Scores::default());
    }

    #[test]
    fn stored_object_is_loaded_exactly() {
        let store = MemoryStore::with_item(KEY, r#"{"X":3,"O":1,"tie":2}"#);

        assert_eq!(load_scores(&store, KEY), Scores { x: 3, o: 1, tie: 2 });
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        for raw in ["not json", "null", "[3,1,2]", "42", r#"{"X":-3}"#, r#"{"X":3"#] {
            let store = MemoryStore::with_item(KEY, raw);

            assert_eq!(load_scores(&store, KEY), Scores::default(), "input: {raw}");
        }
    }

    #[test]
    fn read_failure_falls_back_to_defaults() {
        assert_eq!(load_scores(&BrokenStore, KEY), Scores::default());
    }

    #[test]
    fn save_writes_json_object_under_key() {
        let mut store = MemoryStore::new();

        save_scores(&mut store, KEY, &Scores { x: 1, o: 0, tie: 5 }).unwrap();

        assert_eq!(
            store.get_item(KEY).unwrap().as_deref(),
            Some(r#"{"X":1,"O":0,"tie":5}"#)
        );
    }

    #[test]
    fn save_propagates_write_failure() {
        let err = save_scores(&mut BrokenStore, KEY, &Scores::default()).unwrap_err();

        assert!(err.to_string().contains("failed to write"));
    }
}
