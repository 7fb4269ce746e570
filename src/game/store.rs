//! Key-value persistence slot.
//!
//! The session writes through a `Store` chosen when it is constructed:
//! `LocalStore` wraps the browser's `localStorage`, `MemoryStore` keeps the
//! value for the lifetime of the worker only (sandboxed frames, tests).

use std::collections::HashMap;

pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::Store;

    /// `window.localStorage`.
    pub struct LocalStore {
        storage: web_sys::Storage,
    }

    impl LocalStore {
        /// `None` when there is no window or storage access is denied.
        pub fn open() -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok()??;
            Some(Self { storage })
        }
    }

    impl Store for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) {
            if let Err(e) = self.storage.set_item(key, value) {
                tracing::warn!(key, error = ?e, "localStorage write failed");
            }
        }

        fn remove(&mut self, key: &str) {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!(key, error = ?e, "localStorage remove failed");
            }
        }
    }
}

/// The persistent store when the browser grants one, else a volatile one.
pub fn default_store() -> Box<dyn Store> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(store) = LocalStore::open() {
            return Box::new(store);
        }
    }
    tracing::warn!("persistent storage unavailable, using in-memory store");
    Box::new(MemoryStore::new())
}
