use log::warn;
use shared::{MemoryStorage, StorageBackend, StorageError};
use web_sys::window;

/// `localStorage` when the browser allows it, otherwise a session-only map
/// (private windows and sandboxed iframes can refuse storage access).
pub enum AppStorage {
    Browser(web_sys::Storage),
    Memory(MemoryStorage),
}

impl AppStorage {
    pub fn local() -> Self {
        match window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => AppStorage::Browser(storage),
            None => {
                warn!("localStorage unavailable; wheel settings will not survive a reload");
                AppStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

impl StorageBackend for AppStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AppStorage::Browser(storage) => storage
                .get_item(key)
                .map_err(|e| StorageError::Read(format!("{:?}", e))),
            AppStorage::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(storage) => storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{:?}", e))),
            AppStorage::Memory(storage) => storage.set_item(key, value),
        }
    }
}
