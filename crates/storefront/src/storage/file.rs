//! File-backed storage backend.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{Storage, StorageError};

/// Storage that keeps each record in `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the record, so a record is always either the old or the
/// new document, never a partial write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| io_error(key, e))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(|e| io_error(key, e))?;
        temp_file.as_file().sync_all().map_err(|e| io_error(key, e))?;
        temp_file
            .persist(&path)
            .map_err(|e| io_error(key, e.error))?;

        tracing::debug!(key = %key, path = %path.display(), "Record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("not-yet-created"));

        assert!(storage.get("eKartCart").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data"));

        storage.set("eKartCart", "[]").unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("data/eKartCart.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert_eq!(storage.get("eKartCart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("eKartUser", "{\"id\":1}").unwrap();
        storage.set("eKartUser", "{\"id\":2}").unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(
            storage.get("eKartUser").unwrap().as_deref(),
            Some("{\"id\":2}")
        );
    }

    #[test]
    fn test_remove_missing_record_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.remove("eKartUser").unwrap();
        storage.set("eKartUser", "{}").unwrap();
        storage.remove("eKartUser").unwrap();
        assert!(storage.get("eKartUser").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
    }
}
