//! Durable key-value storage for storefront state.
//!
//! Every record is a whole JSON document stored under a string key and is
//! read and written in full. There are no partial updates and no schema
//! versions; a single overwrite is the unit of durability.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, for tests and throwaway sessions
//! - [`FileStorage`] - one file per key in a data directory, written atomically
//!
//! # Keys
//!
//! See [`crate::models::session::keys`] for the records used by the storefront.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing a stored record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on record {key}: {source}")]
    Io {
        /// Record key.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("failed to encode record {key}: {source}")]
    Encode {
        /// Record key.
        key: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A stored record is not valid JSON for the expected type.
    #[error("corrupt record {key}: {source}")]
    Corrupt {
        /// Record key.
        key: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The key contains characters that cannot be mapped to a record name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A lock guarding in-memory records was poisoned by a panic.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed store of whole serialized records.
///
/// Implementations must make `set` all-or-nothing: after a failed `set`, a
/// subsequent `get` returns the previous value.
pub trait Storage: Send + Sync {
    /// Read the raw record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record stored under `key`. Deleting a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON record.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the record does not decode as `T`, or
/// the backend's error if it cannot be read.
pub fn load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON record, replacing any previous value.
///
/// # Errors
///
/// Returns `StorageError::Encode` if `value` cannot be serialized, or the
/// backend's error if it cannot be written.
pub fn save<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw)
}

/// Read a record at startup, treating a corrupt one as absent.
///
/// Corruption is logged rather than returned so that a damaged record never
/// prevents the storefront from starting.
///
/// # Errors
///
/// Returns the backend's error if it cannot be read at all.
pub fn load_or_discard<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load(storage, key) {
        Err(StorageError::Corrupt { key, source }) => {
            tracing::warn!(key = %key, error = %source, "Discarding corrupt record");
            Ok(None)
        }
        other => other,
    }
}

/// Test doubles for storage failure paths.
#[cfg(test)]
pub(crate) mod testing {
    use super::{MemoryStorage, Storage, StorageError};

    /// Storage whose records can be read but never written.
    #[derive(Debug, Default)]
    pub struct ReadOnlyStorage {
        pub inner: MemoryStorage,
    }

    fn denied(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(denied(key))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(denied(key))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_record() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<u32>> = load(&storage, "absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save(&storage, "numbers", &[1, 2, 3]).unwrap();
        assert_eq!(storage.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));

        let value: Option<Vec<u32>> = load(&storage, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "{not json").unwrap();

        let result: Result<Option<Vec<u32>>, _> = load(&storage, "numbers");
        assert!(matches!(result, Err(StorageError::Corrupt { ref key, .. }) if key == "numbers"));
    }

    #[test]
    fn test_load_or_discard_skips_corrupt_record() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "\"text\"").unwrap();

        let value: Option<Vec<u32>> = load_or_discard(&storage, "numbers").unwrap();
        assert!(value.is_none());
    }
}
