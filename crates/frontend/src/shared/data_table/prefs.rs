//! Durable per-page table preferences (`<page>_perPage`, `<page>_hiddenCols`).
//!
//! Values are JSON. Anything that fails to parse is treated as absent.
//! Concurrent tabs share the same storage; the last write wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStoragePrefs;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl PrefStore for LocalStoragePrefs {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = storage() else { return };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store for tests and non-browser runs.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    items: RefCell<HashMap<String, String>>,
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

pub fn load_json<T: DeserializeOwned>(store: &dyn PrefStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring unreadable preference {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &dyn PrefStore, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    store.set(key, &raw);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_and_garbage() {
        let store = MemoryPrefs::default();
        save_json(&store, "leads_perPage", &50u32);
        assert_eq!(load_json::<u32>(&store, "leads_perPage"), Some(50));

        store.set("leads_hiddenCols", "{not json");
        assert_eq!(load_json::<Vec<String>>(&store, "leads_hiddenCols"), None);

        store.remove("leads_perPage");
        assert_eq!(load_json::<u32>(&store, "leads_perPage"), None);
    }
}
