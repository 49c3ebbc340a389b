//! Persistent key-value storage for shopper session snapshots.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the raw backend: string keys to string documents.
//!   [`MemoryStore`] and [`FileStore`] implement it.
//! - [`PersistentStore`] is the typed adapter the session managers use. It
//!   serializes values as JSON and never surfaces an error: a missing or
//!   corrupt document loads as `None`, and a failed write is logged and
//!   reported as `false`.
//!
//! Each manager owns exactly one key (see [`keys`]), so managers never
//! contend for the same document.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage keys, one per persisted concern.
///
/// Values match the keys the web storefront uses in browser storage so that
/// exported snapshots can be loaded unchanged.
pub mod keys {
    pub const CART: &str = "akasha-cart";
    pub const WISHLIST: &str = "akasha-wishlist";
    pub const RECENTLY_VIEWED: &str = "akasha-recently-viewed";
    pub const RECENT_SEARCHES: &str = "akasha-recent-searches";
    pub const POPUP_SEEN: &str = "akasha-popup-seen";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Writing the value would exceed the backend's capacity.
    #[error("Storage quota exceeded ({needed} bytes needed, {available} available)")]
    QuotaExceeded { needed: usize, available: usize },

    /// Backend lock was poisoned by a panicking writer.
    #[error("Storage backend unavailable")]
    Unavailable,
}

/// A string-keyed document store.
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the document stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Validate a storage key: ASCII alphanumerics, `-` and `_` only.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Typed, best-effort JSON adapter over a [`KeyValueStore`].
///
/// Cheaply cloneable; clones share the same backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap an already shared backend.
    #[must_use]
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// An empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Returns `None` when the key is absent, the backend cannot be read, or
    /// the document does not parse as `T`. Callers treat all three as
    /// "no prior state".
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted state");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed persisted state");
                None
            }
        }
    }

    /// Serialize and store `value` under `key`.
    ///
    /// Returns whether the write succeeded. Failures are logged and otherwise
    /// ignored.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize state for persistence");
                return false;
            }
        };

        match self.backend.set(key, &json) {
            Ok(()) => {
                debug!(key, bytes = json.len(), "Persisted state");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to persist state");
                false
            }
        }
    }

    /// Read the raw document under `key`, treating read errors as absence.
    pub fn load_raw(&self, key: &str) -> Option<String> {
        self.backend.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Failed to read persisted state");
            None
        })
    }

    /// Store a raw document under `key`.
    pub fn save_raw(&self, key: &str, value: &str) -> bool {
        self.backend
            .set(key, value)
            .inspect_err(|e| warn!(key, error = %e, "Failed to persist state"))
            .is_ok()
    }

    /// Delete the document under `key`.
    pub fn remove(&self, key: &str) -> bool {
        self.backend
            .remove(key)
            .inspect_err(|e| warn!(key, error = %e, "Failed to remove persisted state"))
            .is_ok()
    }
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore").finish_non_exhaustive()
    }
}
