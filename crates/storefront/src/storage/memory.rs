//! In-memory key-value backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// A process-local store backed by a `HashMap`.
///
/// Optionally enforces a byte quota across all stored values, mirroring the
/// size limit browsers place on local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// An empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that rejects writes once stored values exceed
    /// `max_bytes` in total.
    #[must_use]
    pub fn with_quota(max_bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(max_bytes),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Unavailable)?;

        if let Some(max_bytes) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let available = max_bytes.saturating_sub(used);
            if value.len() > available {
                return Err(StorageError::QuotaExceeded {
                    needed: value.len(),
                    available,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Unavailable)?;
        entries.remove(key);
        Ok(())
    }
}
