use crate::error::StorageError;
use crate::model::{MovieList, default_lists};
use std::io::Write;
use std::path::PathBuf;
#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Key holding the serialized list collection.
pub const LISTS_KEY: &str = "watchlist_lists";

/// A persistent string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.dir.is_file() {
            return Err(StorageError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename over it so readers never see half a file.
        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)?;
        temp.write_all(value.as_bytes())?;
        temp.flush()?;
        temp.persist(self.path_for(key))?;
        Ok(())
    }
}

/// In-process store. Clones share the same map, so a test can keep a
/// handle and inspect what the app wrote.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.borrow() {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}

/// Reads and writes the list collection under [`LISTS_KEY`].
pub struct ListStorage {
    store: Box<dyn KeyValueStore>,
}

impl ListStorage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Stored lists, or the two defaults when nothing usable is stored.
    pub fn load(&self) -> Vec<MovieList> {
        match self.try_load() {
            Ok(Some(lists)) => lists,
            Ok(None) => {
                tracing::debug!("no stored lists, seeding defaults");
                default_lists()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load lists, falling back to defaults");
                default_lists()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Vec<MovieList>>, StorageError> {
        match self.store.get(LISTS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the stored collection.
    pub fn save(&mut self, lists: &[MovieList]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(lists)?;
        self.store.set(LISTS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListEntry, WATCHED_LIST_ID};

    fn sample_lists() -> Vec<MovieList> {
        let mut lists = default_lists();
        lists[1].entries.push(ListEntry {
            id: 12,
            title: "Spirited Away".to_string(),
            year: 2001,
            poster: "sa.jpg".to_string(),
            rating: 8.6,
        });
        lists.push(MovieList {
            id: "abc".to_string(),
            name: "Rainy Day".to_string(),
            entries: Vec::new(),
            is_default: false,
        });
        lists
    }

    #[test]
    fn test_load_absent_yields_defaults() {
        let storage = ListStorage::new(MemoryStore::new());
        assert_eq!(storage.load(), default_lists());
    }

    #[test]
    fn test_load_corrupted_yields_defaults() {
        let store = MemoryStore::new();
        store.insert_raw(LISTS_KEY, "{not json");
        let storage = ListStorage::new(store);
        let lists = storage.load();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].name, "Watch Later");
        assert_eq!(lists[1].name, "Watched");
        assert!(lists.iter().all(|l| l.is_default && l.entries.is_empty()));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut storage = ListStorage::new(store.clone());
        storage.save(&sample_lists()).unwrap();
        assert!(store.raw(LISTS_KEY).unwrap().contains("Rainy Day"));
        assert_eq!(ListStorage::new(store).load(), sample_lists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut storage = ListStorage::new(store.clone());
        assert!(matches!(
            storage.save(&sample_lists()),
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.raw(LISTS_KEY).is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = ListStorage::new(FileStore::new(dir.path()));
        assert_eq!(storage.load(), default_lists());
        storage.save(&sample_lists()).unwrap();

        let reopened = ListStorage::new(FileStore::new(dir.path()));
        let lists = reopened.load();
        assert_eq!(lists, sample_lists());
        assert!(lists.iter().any(|l| l.id == WATCHED_LIST_ID && l.contains(12)));
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = FileStore::new(&nested);
        store.set(LISTS_KEY, "[]").unwrap();
        assert_eq!(store.get(LISTS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_file_as_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut store = FileStore::new(file.path());
        assert!(matches!(
            store.set(LISTS_KEY, "[]"),
            Err(StorageError::Unavailable(_))
        ));
    }
}
