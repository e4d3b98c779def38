//! File-backed implementation of `KeyValueStorage`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use medinest_core::error::Result;
use medinest_core::storage::KeyValueStorage;
use tracing::debug;

use super::atomic_file::AtomicFile;

type Items = BTreeMap<String, String>;

/// Durable key-value storage kept in a single JSON object on disk.
///
/// Reads go straight to the file so several processes sharing the file see
/// each other's writes. Each write is a locked read-modify-write followed by
/// an atomic rename.
///
/// # Example
///
/// ```ignore
/// use medinest_infrastructure::FileKeyValueStorage;
///
/// let storage = FileKeyValueStorage::new(dir.join("local_storage.json"));
/// let mut store = SessionStore::new(storage);
/// store.initialize();
/// ```
pub struct FileKeyValueStorage {
    file: AtomicFile<Items>,
}

impl FileKeyValueStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::json(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// All stored items; an absent file reads as empty.
    pub fn items(&self) -> Result<Items> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        debug!(key, path = %self.file.path().display(), "Storage write");
        self.file.update(Items::new(), |items| {
            items.insert(key.to_string(), value.to_string());
        })?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        debug!(key, path = %self.file.path().display(), "Storage remove");
        self.file.update(Items::new(), |items| {
            items.remove(key);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let mut storage = FileKeyValueStorage::new(path.clone());
        storage.set_item("medinest_auth", "true").unwrap();
        storage.set_item("medinest_user_type", "doctor").unwrap();
        drop(storage);

        let reopened = FileKeyValueStorage::new(path);
        assert_eq!(
            reopened.get_item("medinest_auth").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(reopened.items().unwrap().len(), 2);
    }

    #[test]
    fn test_remove_item() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileKeyValueStorage::new(temp_dir.path().join("local_storage.json"));

        // Removing from a store that was never written creates nothing.
        storage.remove_item("medinest_auth").unwrap();
        assert!(!storage.path().exists());

        storage.set_item("medinest_auth", "true").unwrap();
        storage.remove_item("medinest_auth").unwrap();
        assert_eq!(storage.get_item("medinest_auth").unwrap(), None);
    }

    #[test]
    fn test_two_handles_share_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let mut first = FileKeyValueStorage::new(path.clone());
        let mut second = FileKeyValueStorage::new(path);

        first.set_item("a", "1").unwrap();
        second.set_item("b", "2").unwrap();

        assert_eq!(first.get_item("b").unwrap().as_deref(), Some("2"));
        assert_eq!(second.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_corrupt_file_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "[]").unwrap();

        let storage = FileKeyValueStorage::new(path);
        assert!(storage.get_item("medinest_auth").is_err());
    }
}
