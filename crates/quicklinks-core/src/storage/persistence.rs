//! Key/value option persistence
//!
//! Each option is an opaque blob stored under a short key. A missing key is
//! a different state from a key holding an empty value.
//!
//! File layout: `{data_dir}/options/{key}.json`. Writes go through a temp
//! file and a rename, so readers never see a half-written value.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::Config;

use super::error::{StorageError, StorageResult};

/// Key/value store for option blobs
pub trait OptionStore {
    /// Read an option. `None` if the key has never been written (or was deleted).
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace an option's value
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Delete an option. Returns whether it existed.
    fn delete(&self, key: &str) -> StorageResult<bool>;
}

/// Option store backed by one file per key
#[derive(Debug, Clone)]
pub struct FileOptionStore {
    dir: PathBuf,
}

impl FileOptionStore {
    /// Store options in the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store options under the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.options_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Size and modification time of a stored option, if present
    pub fn metadata(&self, key: &str) -> StorageResult<Option<fs::Metadata>> {
        let path = self.path_for(key)?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_read(e, path)),
        }
    }
}

impl OptionStore for FileOptionStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_read(e, path)),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value)
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteError { path, source: e }),
        }
    }
}

/// Option store held in memory
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still a consistent map: every write is a single insert/remove
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        self.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(self.lock().remove(key).is_some())
    }
}

impl<T: OptionStore + ?Sized> OptionStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        (**self).delete(key)
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_write(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_write(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOptionStore::new(temp_dir.path().join("options"));

        assert!(store.get("quick_links").unwrap().is_none());

        store.put("quick_links", b"[]").unwrap();
        assert_eq!(store.get("quick_links").unwrap().unwrap(), b"[]");
        assert!(store.path_for("quick_links").unwrap().exists());
    }

    #[test]
    fn test_file_store_overwrite_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOptionStore::new(temp_dir.path());

        store.put("k", b"first value").unwrap();
        store.put("k", b"2").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"2");
        // No temp file left behind
        assert!(!temp_dir.path().join("k.tmp").exists());
    }

    #[test]
    fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOptionStore::new(temp_dir.path());

        store.put("k", b"x").unwrap();
        assert!(store.delete("k").unwrap());
        assert!(store.get("k").unwrap().is_none());
        // Deleting again is fine
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn test_file_store_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOptionStore::new(temp_dir.path());

        assert!(store.metadata("k").unwrap().is_none());
        store.put("k", b"12345").unwrap();
        assert_eq!(store.metadata("k").unwrap().unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileOptionStore::new(temp_dir.path());

        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                store.put(key, b"x"),
                Err(StorageError::InvalidKey { .. })
            ));
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryOptionStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"v");
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn OptionStore> = Box::new(MemoryOptionStore::new());
        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"v");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("file.json");

        atomic_write(&nested_path, b"test data").unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }
}
