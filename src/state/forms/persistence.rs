//! Snapshot persistence behind a swappable store interface

use directories::ProjectDirs;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Full `name -> value` mapping of a form at a point in time
pub type Snapshot = BTreeMap<String, String>;

/// Failures while writing or clearing a stored snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Local, synchronous key-value store for form snapshots.
///
/// `load` never fails: a missing or unreadable slot is `None`.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    fn load(&self, key: &str) -> Option<Snapshot>;
    fn save(&self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError>;
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

/// Convert a JSON value into a snapshot.
///
/// Only a flat object of scalars qualifies; numbers and booleans are
/// stringified, `null` becomes an empty string.
pub fn snapshot_from_value(value: &Value) -> Option<Snapshot> {
    let object = value.as_object()?;
    object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}

/// Parse stored snapshot text, logging and swallowing malformed input
pub fn parse_snapshot(key: &str, text: &str) -> Option<Snapshot> {
    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(value) => snapshot_from_value(&value),
        Err(e) => {
            tracing::warn!("Ignoring unparsable snapshot for '{key}': {e}");
            return None;
        }
    };
    if parsed.is_none() {
        tracing::warn!("Ignoring snapshot for '{key}': not a flat JSON object");
    }
    parsed
}

/// In-memory store holding serialized snapshot text
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw text, as if written by another process
    #[cfg(test)]
    pub fn with_raw(key: &str, text: &str) -> Self {
        let store = Self::default();
        store.put_raw(key, text);
        store
    }

    pub fn put_raw(&self, key: &str, text: &str) {
        self.lock().insert(key.to_string(), text.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Snapshot> {
        let text = self.raw(key)?;
        parse_snapshot(key, &text)
    }

    fn save(&self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let text = serde_json::to_string(snapshot)?;
        self.put_raw(key, &text);
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` per slot under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory
    pub fn default_location() -> Option<Self> {
        ProjectDirs::from("io", "storefront", "storefront-tui")
            .map(|dirs| Self::new(dirs.data_dir().join("forms")))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Percent-encoded file name, so distinct keys never share a file
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Option<Snapshot> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => parse_snapshot(key, &text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read snapshot {}: {e}", path.display());
                None
            }
        }
    }

    fn save(&self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(snapshot)?;

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Whole-file replace so readers never see a partial snapshot
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved snapshot '{key}' to {}", path.display());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_snapshot() -> Snapshot {
        Snapshot::from([
            ("email".to_string(), "joy@example.com".to_string()),
            ("plan".to_string(), "2".to_string()),
        ])
    }

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;
        use serde_json::json;

        #[test]
        fn test_flat_object_parses() {
            let snapshot = parse_snapshot("k", r#"{"email": "a@b.c", "plan": "1"}"#).unwrap();
            assert_eq!(snapshot.get("plan"), Some(&"1".to_string()));
        }

        #[test]
        fn test_scalars_are_stringified() {
            let snapshot =
                snapshot_from_value(&json!({"plan": 2, "agree": true, "note": null})).unwrap();
            assert_eq!(snapshot["plan"], "2");
            assert_eq!(snapshot["agree"], "true");
            assert_eq!(snapshot["note"], "");
        }

        #[test]
        fn test_malformed_text_is_none() {
            assert!(parse_snapshot("k", "{not json").is_none());
        }

        #[test]
        fn test_non_object_is_none() {
            assert!(parse_snapshot("k", "[1, 2]").is_none());
            assert!(parse_snapshot("k", "\"text\"").is_none());
        }

        #[test]
        fn test_nested_values_are_none() {
            assert!(snapshot_from_value(&json!({"a": {"b": "c"}})).is_none());
        }
    }

    mod memory_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_round_trip() {
            let store = MemoryStore::new();
            store.save("signup_form_v1", &sample_snapshot()).unwrap();
            assert_eq!(store.load("signup_form_v1"), Some(sample_snapshot()));
        }

        #[test]
        fn test_missing_key_is_none() {
            assert!(MemoryStore::new().load("signup_form_v1").is_none());
        }

        #[test]
        fn test_malformed_stored_text_is_none() {
            let store = MemoryStore::with_raw("signup_form_v1", "{{{ definitely not json");
            assert!(store.load("signup_form_v1").is_none());
        }

        #[test]
        fn test_clear_removes_slot() {
            let store = MemoryStore::new();
            store.save("k", &sample_snapshot()).unwrap();
            store.clear("k").unwrap();
            assert!(store.load("k").is_none());
            assert!(store.raw("k").is_none());
        }

        #[test]
        fn test_keys_are_isolated() {
            let store = MemoryStore::new();
            store.save("signup_form_v1", &sample_snapshot()).unwrap();
            assert!(store.load("signup_form_v2").is_none());
        }
    }

    mod file_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path().join("forms"));
            store.save("signup_form_v1", &sample_snapshot()).unwrap();
            assert_eq!(store.load("signup_form_v1"), Some(sample_snapshot()));
        }

        #[test]
        fn test_save_leaves_no_temp_file() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            store.save("signup_form_v1", &sample_snapshot()).unwrap();

            let names: Vec<_> = fs::read_dir(dir.path())
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect();
            assert_eq!(names, vec!["signup_form_v1.json".to_string()]);
        }

        #[test]
        fn test_save_overwrites_previous_snapshot() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            store.save("k", &sample_snapshot()).unwrap();

            let replacement = Snapshot::from([("email".to_string(), "x@y.z".to_string())]);
            store.save("k", &replacement).unwrap();
            assert_eq!(store.load("k"), Some(replacement));
        }

        #[test]
        fn test_malformed_file_is_none() {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("signup_form_v1.json"), "oops").unwrap();
            let store = FileStore::new(dir.path());
            assert!(store.load("signup_form_v1").is_none());
        }

        #[test]
        fn test_missing_file_is_none() {
            let dir = tempfile::tempdir().unwrap();
            assert!(FileStore::new(dir.path()).load("nothing").is_none());
        }

        #[test]
        fn test_clear_missing_is_ok() {
            let dir = tempfile::tempdir().unwrap();
            assert!(FileStore::new(dir.path()).clear("nothing").is_ok());
        }

        #[test]
        fn test_clear_removes_file() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            store.save("k", &sample_snapshot()).unwrap();
            store.clear("k").unwrap();
            assert!(!dir.path().join("k.json").exists());
        }

        #[test]
        fn test_key_is_encoded_into_file_name() {
            let store = FileStore::new("/tmp/forms");
            assert_eq!(
                store.path_for("../evil key"),
                PathBuf::from("/tmp/forms/..%2Fevil%20key.json")
            );
            assert_eq!(
                store.path_for("signup_form_v1"),
                PathBuf::from("/tmp/forms/signup_form_v1.json")
            );
        }

        #[test]
        fn test_similar_keys_use_separate_slots() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::new(dir.path());
            let other = Snapshot::from([("email".to_string(), "x@y.z".to_string())]);

            store.save("signup form", &sample_snapshot()).unwrap();
            store.save("signup_form", &other).unwrap();

            assert_eq!(store.load("signup form"), Some(sample_snapshot()));
            assert_eq!(store.load("signup_form"), Some(other));

            store.clear("signup_form").unwrap();
            assert_eq!(store.load("signup form"), Some(sample_snapshot()));
        }
    }
}
