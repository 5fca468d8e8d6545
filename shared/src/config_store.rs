//! A value mirrored into key/value storage.
//!
//! The in-memory copy is always authoritative for the running session.
//! Storage is written only when the serialized form actually changes, and
//! read or write failures are logged rather than surfaced.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Minimal string key/value storage, shaped like the browser's `Storage`.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Process-local storage. Used when the browser offers none, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_item(self, key: &str, value: &str) -> Self {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    #[cfg(test)]
    fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Simulates a full quota.
    #[cfg(test)]
    fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Read(format!("read of {} refused", key)));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Either a replacement value or a function of the previous value.
pub enum StoreUpdate<T> {
    Value(T),
    Update(Box<dyn FnOnce(&T) -> T>),
}

impl<T> StoreUpdate<T> {
    pub fn with(update: impl FnOnce(&T) -> T + 'static) -> Self {
        StoreUpdate::Update(Box::new(update))
    }

    fn apply(self, previous: &T) -> T {
        match self {
            StoreUpdate::Value(value) => value,
            StoreUpdate::Update(update) => update(previous),
        }
    }
}

impl<T> From<T> for StoreUpdate<T> {
    fn from(value: T) -> Self {
        StoreUpdate::Value(value)
    }
}

type Normalizer<T> = Box<dyn Fn(T) -> T>;

pub struct PersistedCell<T, S> {
    storage: S,
    key: String,
    value: T,
    normalize: Normalizer<T>,
    last_written: Option<String>,
    writes: usize,
}

impl<T, S> PersistedCell<T, S>
where
    T: Serialize + DeserializeOwned,
    S: StorageBackend,
{
    pub fn new(storage: S, key: impl Into<String>, initial: T) -> Self {
        Self::with_normalizer(storage, key, initial, |value| value)
    }

    /// Like [`PersistedCell::new`], passing loaded and externally synced
    /// values through `normalize` before accepting them.
    pub fn with_normalizer(
        storage: S,
        key: impl Into<String>,
        initial: T,
        normalize: impl Fn(T) -> T + 'static,
    ) -> Self {
        let key = key.into();
        let loaded = match storage.get_item(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => Some((normalize(value), raw)),
                Err(err) => {
                    warn!("Stored value for {} is corrupt, using default: {}", key, err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("Could not read {} from storage, using default: {}", key, err);
                None
            }
        };

        let (value, last_written) = match loaded {
            Some((value, raw)) => (value, Some(raw)),
            None => (initial, None),
        };

        let mut cell = Self {
            storage,
            key,
            value,
            normalize: Box::new(normalize),
            last_written,
            writes: 0,
        };
        // Seeds missing data and rewrites values the normalizer changed.
        cell.persist();
        cell
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Number of writes that reached storage.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Replaces the value, returning whether storage was written.
    pub fn set(&mut self, update: impl Into<StoreUpdate<T>>) -> bool {
        self.value = update.into().apply(&self.value);
        self.persist()
    }

    /// Adopts a value written by another tab. `None` means the key was
    /// removed there, which leaves this copy untouched.
    pub fn sync_external(&mut self, raw: Option<&str>) -> bool {
        let Some(raw) = raw else {
            return false;
        };
        if self.last_written.as_deref() == Some(raw) {
            return false;
        }
        match serde_json::from_str::<T>(raw) {
            Ok(value) => {
                debug!("Picked up external change to {}", self.key);
                self.value = (self.normalize)(value);
                self.last_written = Some(raw.to_string());
                true
            }
            Err(err) => {
                warn!("Ignoring unparseable external value for {}: {}", self.key, err);
                false
            }
        }
    }

    fn persist(&mut self) -> bool {
        let serialized = match serde_json::to_string(&self.value) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("Could not serialize {}: {}", self.key, err);
                return false;
            }
        };

        if self.last_written.as_deref() == Some(serialized.as_str()) {
            return false;
        }

        match self.storage.set_item(&self.key, &serialized) {
            Ok(()) => {
                self.last_written = Some(serialized);
                self.writes += 1;
                true
            }
            Err(err) => {
                error!("Could not persist {}: {}", self.key, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{default_categories, Category};
    use crate::validation::sanitize_categories;

    const KEY: &str = "test.value";

    #[test]
    fn test_seeds_storage_with_initial_value() {
        let storage = Rc::new(MemoryStorage::new());
        let cell = PersistedCell::new(storage.clone(), KEY, "hello".to_string());
        assert_eq!(cell.get(), "hello");
        assert_eq!(storage.raw(KEY).as_deref(), Some("\"hello\""));
        assert_eq!(cell.write_count(), 1);
    }

    #[test]
    fn test_loads_existing_value_without_writing() {
        let storage = Rc::new(MemoryStorage::new().with_item(KEY, "\"stored\""));
        let cell = PersistedCell::new(storage, KEY, "initial".to_string());
        assert_eq!(cell.get(), "stored");
        assert_eq!(cell.write_count(), 0);
    }

    #[test]
    fn test_corrupt_value_falls_back_and_reseeds() {
        let storage = Rc::new(MemoryStorage::new().with_item(KEY, "{not json"));
        let cell = PersistedCell::new(storage.clone(), KEY, 42u32);
        assert_eq!(*cell.get(), 42);
        assert_eq!(storage.raw(KEY).as_deref(), Some("42"));
    }

    #[test]
    fn test_read_failure_falls_back() {
        let storage = Rc::new(MemoryStorage::new().with_item(KEY, "7"));
        storage.set_fail_reads(true);
        let cell = PersistedCell::new(storage, KEY, 1u32);
        assert_eq!(*cell.get(), 1);
    }

    #[test]
    fn test_same_value_twice_writes_once() {
        let storage = Rc::new(MemoryStorage::new());
        let mut cell = PersistedCell::new(storage, KEY, 0u32);
        let before = cell.write_count();

        assert!(cell.set(5u32));
        assert!(!cell.set(5u32));
        assert_eq!(cell.write_count(), before + 1);
    }

    #[test]
    fn test_updater_sees_previous_value() {
        let storage = Rc::new(MemoryStorage::new());
        let mut cell = PersistedCell::new(storage.clone(), KEY, vec![1u32, 2]);
        cell.set(StoreUpdate::with(|prev: &Vec<u32>| {
            let mut next = prev.clone();
            next.push(3);
            next
        }));
        assert_eq!(cell.get(), &vec![1, 2, 3]);
        assert_eq!(storage.raw(KEY).as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_write_failure_keeps_memory_value() {
        let storage = Rc::new(MemoryStorage::new());
        let mut cell = PersistedCell::new(storage.clone(), KEY, 1u32);
        storage.set_fail_writes(true);

        assert!(!cell.set(2u32));
        assert_eq!(*cell.get(), 2);
        assert_eq!(storage.raw(KEY).as_deref(), Some("1"));

        // Once space frees up the pending value is written on the next set.
        storage.set_fail_writes(false);
        assert!(cell.set(2u32));
        assert_eq!(storage.raw(KEY).as_deref(), Some("2"));
    }

    #[test]
    fn test_normalizer_replaces_unusable_categories() {
        let stored = serde_json::to_string(&vec![Category::new("Only", "#FF6B6B")]).unwrap();
        let storage = Rc::new(MemoryStorage::new().with_item(KEY, &stored));
        let cell = PersistedCell::with_normalizer(
            storage.clone(),
            KEY,
            default_categories(),
            sanitize_categories,
        );
        assert_eq!(cell.get(), &default_categories());
        let rewritten: Vec<Category> = serde_json::from_str(&storage.raw(KEY).unwrap()).unwrap();
        assert_eq!(rewritten, default_categories());
    }

    #[test]
    fn test_sync_external() {
        let storage = Rc::new(MemoryStorage::new());
        let mut cell = PersistedCell::new(storage, KEY, 1u32);
        let writes = cell.write_count();

        assert!(cell.sync_external(Some("9")));
        assert_eq!(*cell.get(), 9);
        assert!(!cell.sync_external(Some("9")));
        assert!(!cell.sync_external(Some("garbage")));
        assert!(!cell.sync_external(None));
        assert_eq!(*cell.get(), 9);

        // The synced value already matches storage, so no echo write.
        assert!(!cell.set(9u32));
        assert_eq!(cell.write_count(), writes);
    }
}
