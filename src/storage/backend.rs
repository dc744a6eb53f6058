//! # Blob Store Trait

use super::errors::StorageResult;

/// Key/value store holding whole serialized blobs.
///
/// Writes replace the entire value for a key; there are no partial writes.
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Read the blob stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the blob stored under `key`
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}
