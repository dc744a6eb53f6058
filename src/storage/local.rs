//! # Local Filesystem Blob Store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::backend::BlobStore;
use super::errors::{check_key, StorageResult};

/// Stores each key as `<root>/<key>.json`
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl BlobStore for LocalBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Write to a sibling file first so a crash never leaves half a blob.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tempfile::TempDir;

    #[test]
    fn test_put_get() {
        let temp = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp.path());

        store.put("zippy-packages", "[]").unwrap();
        assert_eq!(store.get("zippy-packages").unwrap().as_deref(), Some("[]"));
        assert!(temp.path().join("zippy-packages.json").exists());
    }

    #[test]
    fn test_put_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp.path());

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert!(!temp.path().join("k.json.tmp").exists());
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp.path().join("not-created-yet"));

        assert!(store.get("zippy-packages").unwrap().is_none());
        assert!(!temp.path().join("not-created-yet").exists());
    }

    #[test]
    fn test_creates_root_on_write() {
        let temp = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp.path().join("a").join("b"));

        store.put("k", "v").unwrap();
        assert!(temp.path().join("a/b/k.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let store = LocalBlobStore::new(temp.path());

        let result = store.put("../escape", "x");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
