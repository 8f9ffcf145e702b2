//! Key/value persistence for the two JSON documents the app keeps
//! (the flashcard library and the child's profile).
//!
//! Reads are lenient: a missing key, an unreadable file or malformed JSON all
//! come back as `None` and are only logged. Writes are total overwrites.

mod file_store;
mod memory_store;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String-keyed document storage
pub trait KeyValueStore: Send + Sync {
    /// Raw value for `key`, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`, returning whether anything was stored
    fn remove(&self, key: &str) -> Result<bool>;
}

/// Store handle shared by the repository and the profile manager
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Keys may only contain ASCII letters, digits, `_`, `-` and `.`
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Read and decode a JSON document, treating every failure as "absent"
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read '{}', using default: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Stored '{}' is malformed, using default: {}", key, e);
            None
        }
    }
}

/// Encode `value` as JSON and overwrite `key` with it
pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    store.set(key, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("library").is_ok());
        assert!(validate_key("sl_profile_v1").is_ok());
        assert!(validate_key("backup-2.json").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_read_json_missing_is_none() {
        let store = MemoryStore::new();
        let value: Option<Value> = read_json(&store, "library");
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_malformed_is_none() {
        let store = MemoryStore::new();
        store.set("library", "{not json").unwrap();

        let value: Option<Vec<Value>> = read_json(&store, "library");
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_json() {
        let store = MemoryStore::new();
        write_json(&store, "profile", &serde_json::json!({ "name": "Ana" })).unwrap();

        let value: Value = read_json(&store, "profile").unwrap();
        assert_eq!(value["name"], "Ana");
    }
}
