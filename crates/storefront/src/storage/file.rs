//! File-backed key-value backend.
//!
//! One JSON document per key, stored as `<dir>/<key>.json`. Writes go to a
//! temporary sibling first and are renamed into place, so readers never see
//! a partially written document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, validate_key};

/// A store that keeps each key in its own file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));

        let written = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("state");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_set_writes_one_file_per_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();

        store.set("akasha-cart", "[]").unwrap();
        store.set("akasha-cart", "[1]").unwrap();

        let contents = fs::read_to_string(tmp.path().join("akasha-cart.json")).unwrap();
        assert_eq!(contents, "[1]");
        assert!(!tmp.path().join(".akasha-cart.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        // A directory in place of the target makes the rename fail.
        fs::create_dir(tmp.path().join("akasha-cart.json")).unwrap();
        fs::write(tmp.path().join("akasha-cart.json").join("keep"), "x").unwrap();

        assert!(matches!(
            store.set("akasha-cart", "[]"),
            Err(StorageError::Io(_))
        ));
        assert!(!tmp.path().join(".akasha-cart.json.tmp").exists());
    }

    #[test]
    fn test_get_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert_eq!(store.get("akasha-wishlist").unwrap(), None);
        store.remove("akasha-wishlist").unwrap();
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(StorageError::InvalidKey(_))));
    }
}
