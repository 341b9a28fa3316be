//! Test stores — in-memory `SessionStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use scrollytale_core::error::StoryError;
use scrollytale_core::store::SessionStore;
use serde_json::Value;

/// An in-memory session store. Tests can seed raw values (including
/// malformed ones) and inspect what was written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: Value) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value);
        store
    }

    /// Returns a clone of the value under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Number of `set` calls so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoryError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoryError> {
        self.entries.lock().unwrap().insert(key.to_owned(), value);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoryError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that always returns a storage error. Useful for testing that
/// storage problems never stop the story.
#[derive(Debug)]
pub struct FailingStore;

impl SessionStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StoryError> {
        Err(StoryError::Storage("quota exceeded".into()))
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), StoryError> {
        Err(StoryError::Storage("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoryError> {
        Err(StoryError::Storage("quota exceeded".into()))
    }
}
