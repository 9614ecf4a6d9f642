//! JSON-file store for native builds
//!
//! The whole store is one JSON object of string values. Every `set` rewrites
//! the file through a temporary and a rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!("Opened store {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{BEST_SCORE_KEY, load_best_score, save_best_score};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy-bunny-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        save_best_score(&mut store, 12).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(load_best_score(&reopened), 12);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Format(_))));
        let _ = fs::remove_file(&path);
    }
}
