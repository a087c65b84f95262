//! File-backed key-value store
//!
//! Keeps the same string entries a browser would hold in `localStorage`,
//! as one JSON object on disk. Every write is flushed immediately.

use health_assessment_shared::{AssessmentError, AssessmentResult, KeyValueStore};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> AssessmentResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                AssessmentError::Storage(format!("{} is not a valid store: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AssessmentError::Storage(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "Store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> AssessmentResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AssessmentError::Storage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, e: std::io::Error) -> AssessmentError {
        AssessmentError::Storage(format!("cannot write {}: {}", self.path.display(), e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AssessmentResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> AssessmentResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> AssessmentResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "health-assessment-store-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("session.json")
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let path = scratch("missing");
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.get("userDetails").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_persist_across_opens() {
        let path = scratch("persist");
        let mut store = FileStore::open(&path).unwrap();
        store.set("healthScore", "120".to_string()).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("healthScore").unwrap().as_deref(), Some("120"));

        let mut reopened = reopened;
        reopened.remove("healthScore").unwrap();
        assert_eq!(FileStore::open(&path).unwrap().get("healthScore").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }
}
