//! Durable key-value storage backing the statistics service.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Failure persisting statistics.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write statistics file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode statistics: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal capability the statistics service needs from a durable store:
/// string values under named keys, with a batch made durable by `flush`.
pub trait KeyValueStorage: Send + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// JSON file store. The whole map is rewritten on flush via a temp file and
/// rename, so a reader never sees a half-written batch.
pub struct JsonFileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Open the store, reading any existing file. A missing or corrupt file
    /// starts empty; absent keys read as their defaults downstream.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Non-durable store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_storage_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "movie-quiz-storage-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        {
            let mut storage = JsonFileStorage::open(&path);
            assert_eq!(storage.get("gamesCount"), None);
            storage.set("gamesCount", "3".to_string());
            storage.flush().unwrap();
        }

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get("gamesCount"), Some("3".to_string()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let storage = JsonFileStorage::open("/nonexistent/dir/stats.json");
        assert_eq!(storage.get("gamesCount"), None);
    }
}
