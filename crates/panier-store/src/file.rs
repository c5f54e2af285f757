//! # File Store
//!
//! Key-value backend persisted as a single JSON document.
//!
//! ## On-Disk Format
//! ```json
//! {
//!   "version": 1,
//!   "updatedAt": "2026-10-15T09:30:00Z",
//!   "entries": {
//!     "cart-data": "[{\"id\":\"p1\",\"name\":\"Shoes\",\"unitPrice\":10000,\"quantity\":2}]",
//!     "promo-code": "CCA15"
//!   }
//! }
//! ```
//!
//! ## Durability
//! Every write rewrites the whole document to a sibling temp file and
//! renames it over the original, so a crash mid-write leaves either the old
//! or the new document, never half of one.
//!
//! The in-memory entries only change once the new document is on disk, so
//! a failed write leaves the store exactly as it was.
//!
//! A missing file is an empty store. An unreadable or corrupt file is also
//! treated as empty (and logged); the next write replaces it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    version: u32,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// JSON-file-backed key-value store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    updated_at: Option<DateTime<Utc>>,
}

impl FileStore {
    /// Opens the store at `path`, reading whatever is there.
    ///
    /// Never fails: a file that cannot be read or parsed yields an empty
    /// store. The file and its parent directory are created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (entries, updated_at) = match read_document(&path) {
            Some(doc) => {
                debug!(path = %path.display(), keys = doc.entries.len(), "Opened file store");
                (doc.entries, Some(doc.updated_at))
            }
            None => (BTreeMap::new(), None),
        };

        FileStore {
            path,
            entries,
            updated_at,
        }
    }

    /// When the document was last written, if it ever was.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Writes `entries` as the new document and, only if that succeeds,
    /// makes them the current entries.
    fn commit(&mut self, entries: BTreeMap<String, String>) -> StoreResult<()> {
        let now = Utc::now();
        let doc = StoreDocument {
            version: DOCUMENT_VERSION,
            updated_at: now,
            entries,
        };
        let contents = serde_json::to_string_pretty(&doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        self.entries = doc.entries;
        self.updated_at = Some(now);
        debug!(path = %self.path.display(), "File store flushed");
        Ok(())
    }
}

fn read_document(path: &Path) -> Option<StoreDocument> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No store file yet, starting empty");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file unreadable, starting empty");
            return None;
        }
    };

    match serde_json::from_str::<StoreDocument>(&raw) {
        Ok(doc) if doc.version == DOCUMENT_VERSION => Some(doc),
        Ok(doc) => {
            warn!(
                path = %path.display(),
                version = doc.version,
                "Unsupported store file version, starting empty"
            );
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file corrupt, starting empty");
            None
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.commit(entries)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nope.json"));
        assert_eq!(store.get("cart-data").unwrap(), None);
        assert!(store.updated_at().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("panier.json");

        let mut store = FileStore::open(&path);
        store.set("promo-code", "CCA15").unwrap();
        store.set("cart-data", "[]").unwrap();
        assert!(store.updated_at().is_some());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("promo-code").unwrap().as_deref(), Some("CCA15"));
        assert_eq!(reopened.get("cart-data").unwrap().as_deref(), Some("[]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panier.json");

        let mut store = FileStore::open(&path);
        store.set("promo-code", "CCA15").unwrap();
        store.remove("promo-code").unwrap();
        store.remove("never-set").unwrap();

        assert_eq!(FileStore::open(&path).get("promo-code").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panier.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("cart-data").unwrap(), None);

        store.set("cart-data", "[]").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("cart-data").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_write_leaves_entries_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panier.json");
        let mut store = FileStore::open(&path);
        store.set("promo-code", "CCA15").unwrap();

        // A directory where the document should be makes the rename fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set("cart-data", "[]").is_err());
        assert_eq!(store.get("cart-data").unwrap(), None);
        assert!(store.remove("promo-code").is_err());
        assert_eq!(store.get("promo-code").unwrap().as_deref(), Some("CCA15"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_write_to_directory_path_is_not_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path());

        assert!(store.set("promo-code", "CCA15").is_err());
        assert_eq!(store.get("promo-code").unwrap(), None);
        assert!(store.updated_at().is_none());
    }

    #[test]
    fn test_unknown_version_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panier.json");
        fs::write(
            &path,
            r#"{"version":99,"updatedAt":"2026-01-01T00:00:00Z","entries":{"promo-code":"CCA15"}}"#,
        )
        .unwrap();

        assert_eq!(FileStore::open(&path).get("promo-code").unwrap(), None);
    }
}
