//! # In-Memory Blob Store

use std::collections::HashMap;
use std::sync::RwLock;

use super::backend::BlobStore;
use super::errors::{check_key, StorageError, StorageResult};

/// Process-local blob store, used by tests and the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        let blobs = self.blobs.read().map_err(|_| StorageError::Poisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        let mut blobs = self.blobs.write().map_err(|_| StorageError::Poisoned)?;
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
