//! One JSON file per document under a root directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{DocumentStore, WriteBatch, resolve_document};
use crate::error::{Result, StoreError};
use crate::path::DocumentPath;

/// Writes `<root>/<path>.json` for each document.
///
/// Each file is replaced atomically (temp file + rename). A batch is not
/// atomic across files: a failure part-way leaves earlier files written.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a document path.
    pub fn file_for(&self, path: &DocumentPath) -> PathBuf {
        let mut file = self.root.clone();
        for segment in path.segments() {
            file.push(segment);
        }
        file.set_extension("json");
        file
    }

    fn write_document(&self, path: &DocumentPath, bytes: &[u8]) -> Result<()> {
        let target = self.file_for(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = target.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &target).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: target.clone(),
            source: e,
        })
    }
}

impl DocumentStore for JsonDirStore {
    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        if !self.root.is_dir() {
            return Err(StoreError::Connectivity {
                message: format!("storage directory {} does not exist", self.root.display()),
            });
        }

        let now = Utc::now();
        for (path, record) in batch.ops() {
            let document = resolve_document(record, now);
            let bytes = serde_json::to_vec_pretty(&document)?;
            self.write_document(path, &bytes)?;
        }
        tracing::debug!(root = %self.root.display(), documents = batch.len(), "batch written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::{FieldValue, Record};
    use tempfile::tempdir;

    #[test]
    fn test_writes_json_files() {
        let dir = tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path());
        let path = DocumentPath::parse("students/CSE/II/A/CSE_II_A_1").unwrap();

        let mut record = Record::new();
        record.insert_text("name", "Asha");
        record.insert("createdAt", FieldValue::ServerTimestamp);
        let mut batch = store.begin_batch();
        batch.set(path.clone(), record);
        store.commit(batch).unwrap();

        let file = dir.path().join("students/CSE/II/A/CSE_II_A_1.json");
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(doc["name"], "Asha");
        assert!(doc["createdAt"].is_string());
        assert!(!file.with_extension("json.tmp").exists());
        assert_eq!(store.file_for(&path), file);
    }

    #[test]
    fn test_missing_root_is_connectivity() {
        let dir = tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path().join("missing"));
        let err = store.commit(WriteBatch::new()).unwrap_err();
        assert!(err.is_connectivity());
    }
}
