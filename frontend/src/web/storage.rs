//! Durable key-value storage
//!
//! Backs the persisted auth token and theme preference. Failures are
//! reported as `false` and otherwise ignored: losing a persisted value only
//! costs the user a fresh login or a default theme.

use gloo_storage::{LocalStorage, Storage};

pub trait KeyValueStorage {
    /// `None` if the key is absent or the storage is unavailable
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::set(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::delete(key);
        true
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;
