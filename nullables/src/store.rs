//! Nullable store: in-memory local storage for testing.

use authmatech_store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory key-value store.
///
/// Counts every access so tests can assert a path never consulted storage,
/// and can be switched to fail like a browser with storage disabled.
pub struct NullStore {
    entries: Mutex<HashMap<String, String>>,
    accesses: AtomicUsize,
    unavailable: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            accesses: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Create a store pre-seeded with one entry. The seed is not counted as
    /// an access.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent operation fail with `StoreError::Unavailable`.
    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    /// Number of get/set/delete calls so far.
    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    /// Read an entry without counting it as an access.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn touch(&self) -> Result<(), StoreError> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("storage disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for NullStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.touch()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.touch()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.touch()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let store = NullStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert_eq!(store.accesses(), 4);
    }

    #[test]
    fn seeded_entry_is_not_an_access() {
        let store = NullStore::with_entry("k", "v");
        assert_eq!(store.accesses(), 0);
        assert_eq!(store.peek("k").as_deref(), Some("v"));
        assert_eq!(store.accesses(), 0);
    }

    #[test]
    fn unavailable_store_fails() {
        let store = NullStore::new();
        store.make_unavailable();
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.peek("k"), None);
    }
}
