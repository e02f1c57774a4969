//! A tiny persistent key-value store for local signups.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::StoreError;

/// Key under which the last local signup is remembered.
pub const WAITLIST_KEY: &str = "carbonzero_waitlist";

/// What the local handler remembers about a signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
    pub email: String,
    /// Unix time in milliseconds.
    pub at: i64,
}

impl SignupRecord {
    /// Record for `email`, stamped with the current time.
    pub fn now(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            at: Utc::now().timestamp_millis(),
        }
    }
}

/// String-keyed JSON values persisted to a single file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(&items)?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }

    /// Value stored under `key`, if any.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut items = self.read_all()?;
        match items.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Remember a signup under [`WAITLIST_KEY`].
    pub fn remember_signup(&self, record: &SignupRecord) -> Result<(), StoreError> {
        self.set_item(WAITLIST_KEY, record)
    }

    /// The last remembered signup.
    pub fn last_signup(&self) -> Result<Option<SignupRecord>, StoreError> {
        self.get_item(WAITLIST_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        assert_eq!(store.last_signup().unwrap(), None);
    }

    #[test]
    fn test_remember_signup_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("store.json"));

        store
            .remember_signup(&SignupRecord {
                email: "first@example.com".into(),
                at: 1,
            })
            .unwrap();
        store
            .remember_signup(&SignupRecord {
                email: "second@example.com".into(),
                at: 2,
            })
            .unwrap();

        let record = store.last_signup().unwrap().unwrap();
        assert_eq!(record.email, "second@example.com");
        assert_eq!(record.at, 2);
    }

    #[test]
    fn test_other_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        store.set_item("theme", &"dark").unwrap();
        store.remember_signup(&SignupRecord::now("a@b.co")).unwrap();

        assert_eq!(store.get_item::<String>("theme").unwrap().as_deref(), Some("dark"));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(WAITLIST_KEY));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = LocalStore::new(path);
        assert!(matches!(store.last_signup(), Err(StoreError::Json(_))));
    }
}
