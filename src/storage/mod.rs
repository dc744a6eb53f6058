//! # Blob Storage
//!
//! Whole-value key/value backends that the package store persists into.
//! A backend holds opaque strings; it knows nothing about packages.

mod backend;
mod errors;
mod local;
mod memory;

pub use backend::BlobStore;
pub use errors::{check_key, StorageError, StorageResult};
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
