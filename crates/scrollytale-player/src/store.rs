//! File-backed session store, so a rerun of the player acts like a reload.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use scrollytale_core::error::StoryError;
use scrollytale_core::store::SessionStore;
use serde_json::{Map, Value};
use tracing::warn;

/// Keeps all session entries in one JSON object file, rewritten wholesale
/// on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoryError> {
        match self.read_text()? {
            Some(text) => self.decode(&text),
            None => Ok(Map::new()),
        }
    }

    fn read_text(&self) -> Result<Option<String>, StoryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoryError::Storage(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn decode(&self, text: &str) -> Result<Map<String, Value>, StoryError> {
        match serde_json::from_str(text) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) | Err(_) => Err(StoryError::Storage(format!(
                "{} is not a session object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, entries: Map<String, Value>) -> Result<(), StoryError> {
        let text = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| StoryError::Storage(format!("cannot encode session: {e}")))?;
        std::fs::write(&self.path, text).map_err(|e| {
            StoryError::Storage(format!("cannot write {}: {e}", self.path.display()))
        })
    }

    fn update(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<(), StoryError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoryError::Storage("session lock poisoned".into()))?;
        let mut entries = match self.read_text()? {
            Some(text) => self.decode(&text).unwrap_or_else(|e| {
                warn!(error = %e, "replacing corrupt session file");
                Map::new()
            }),
            None => Map::new(),
        };
        f(&mut entries);
        self.write_all(entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoryError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoryError::Storage("session lock poisoned".into()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoryError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoryError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use scrollytale_core::error::StoryError;
    use scrollytale_core::store::SessionStore;

    use super::FileSessionStore;

    fn temp_session(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "scrollytale-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = FileSessionStore::new(temp_session("missing"));

        assert_eq!(store.get("storyTextState").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove_through_file() {
        let path = temp_session("roundtrip");
        let store = FileSessionStore::new(&path);

        store.set("storyScrollPosition", serde_json::json!(1200.0)).unwrap();
        store.set("storyTextState", serde_json::json!({ "beatId": "theEnd" })).unwrap();
        store.remove("storyScrollPosition").unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get("storyScrollPosition").unwrap(), None);
        assert_eq!(
            reopened.get("storyTextState").unwrap(),
            Some(serde_json::json!({ "beatId": "theEnd" }))
        );
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_is_storage_error_then_replaced() {
        let path = temp_session("corrupt");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = FileSessionStore::new(&path);

        assert!(matches!(store.get("storyTextState"), Err(StoryError::Storage(_))));
        store.set("storyTextState", serde_json::json!(null)).unwrap();
        assert_eq!(store.get("storyTextState").unwrap(), Some(serde_json::json!(null)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_read_failure_is_not_mistaken_for_empty_session() {
        // Arrange
        let path = temp_session("unreadable");
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir(&path).unwrap();
        let store = FileSessionStore::new(&path);

        // Act
        let result = store.set("storyTextState", serde_json::json!(null));

        // Assert
        let Err(StoryError::Storage(message)) = &result else {
            panic!("expected a storage error, got {result:?}");
        };
        assert!(message.starts_with("cannot read"), "{message}");
        assert!(path.is_dir());
        let _ = std::fs::remove_dir(path);
    }
}
