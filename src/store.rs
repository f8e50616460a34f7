//! Per-sandbox key-value store.
//!
//! Task setups record values here (commit hashes, probe outcomes) that the
//! matching checks read back in a later process invocation. The store is a
//! single JSON object of string pairs kept in a hidden subfolder of the
//! sandbox, so deleting the sandbox folder deletes the store with it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Hidden folder inside the sandbox holding workshop state.
pub const STORE_FOLDER: &str = ".workshop";
const STORE_FILE: &str = "store";

/// String map persisted inside one exercise sandbox.
///
/// Reads and writes are whole-file; a single learner in a single process is
/// assumed, so no locking is attempted.
#[derive(Debug, Clone)]
pub struct SandboxStore {
    location: PathBuf,
}

impl SandboxStore {
    /// Creates a store rooted in the given sandbox folder.
    ///
    /// Nothing is written until the first `put`.
    pub fn new(sandbox: &Path) -> Self {
        Self {
            location: sandbox.join(STORE_FOLDER).join(STORE_FILE),
        }
    }

    /// Returns the folder containing the store file.
    ///
    /// The sandbox's ignore rules exclude this folder from version control.
    pub fn folder(&self) -> &Path {
        self.location.parent().expect("store file has a parent")
    }

    /// Sets `key` to `value`, creating the store file on first use.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        std::fs::create_dir_all(self.folder())?;
        let payload = serde_json::to_string(&map)
            .map_err(|e| Error::StoreSerialize(e.to_string()))?;
        std::fs::write(&self.location, payload)?;
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// An absent store file reads as an empty map.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.location.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.location)?;
        serde_json::from_str(&content).map_err(|source| Error::StoreCorrupt {
            path: self.location.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_values() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = SandboxStore::new(dir.path());

        store.put("hash", "abc123").expect("put failed");
        store.put("isRepo", "true").expect("put failed");

        assert_eq!(store.get("hash").unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get("isRepo").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn unset_key_reads_as_none() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = SandboxStore::new(dir.path());

        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn overwrites_existing_key() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = SandboxStore::new(dir.path());

        store.put("key", "old").unwrap();
        store.put("key", "new").unwrap();

        assert_eq!(store.get("key").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn persists_across_store_instances() {
        let dir = TempDir::new().expect("failed to create temp dir");

        SandboxStore::new(dir.path()).put("key", "value").unwrap();

        let reopened = SandboxStore::new(dir.path());
        assert_eq!(reopened.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn corrupt_store_surfaces_parse_error() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = SandboxStore::new(dir.path());
        std::fs::create_dir_all(store.folder()).unwrap();
        std::fs::write(dir.path().join(STORE_FOLDER).join("store"), "not json").unwrap();

        assert!(matches!(
            store.get("key"),
            Err(crate::error::Error::StoreCorrupt { .. })
        ));
    }

    #[test]
    fn store_lives_in_hidden_folder() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = SandboxStore::new(dir.path());

        store.put("key", "value").unwrap();

        assert!(dir.path().join(STORE_FOLDER).join("store").exists());
    }
}
