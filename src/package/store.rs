//! # Package Store
//!
//! CRUD over the package collection. The whole collection lives under one
//! blob key; every mutation reads it, changes it in memory and writes it
//! back in full.
//!
//! Failures never reach the caller:
//! - unreadable or corrupt blob: logged at WARN, treated as empty
//! - failed write: logged at ERROR, swallowed
//!
//! The store does not validate. Callers run the validator first.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::observability::Logger;
use crate::storage::{BlobStore, StorageError};

use super::id::generate_id;
use super::types::{Package, PackageSubmission, PackageUpdate};

/// Blob key holding the package collection
pub const DEFAULT_STORAGE_KEY: &str = "zippy-packages";

/// Storage-independent package CRUD
pub trait PackageStore: Send + Sync {
    /// Persist a new package with a fresh id and `created_at == updated_at`
    fn create(&self, submission: PackageSubmission) -> Package;

    /// All packages in insertion order
    fn list(&self) -> Vec<Package>;

    fn get_by_id(&self, id: &str) -> Option<Package>;

    /// Merge `update` into the package and refresh `updated_at`.
    /// `None` if no package has this id.
    fn update(&self, id: &str, update: PackageUpdate) -> Option<Package>;

    /// Remove the package, returning whether it existed
    fn delete(&self, id: &str) -> bool;
}

/// [`PackageStore`] persisting the collection as one JSON array in a [`BlobStore`]
#[derive(Debug)]
pub struct BlobPackageStore<B: BlobStore> {
    backend: B,
    key: String,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl<B: BlobStore> BlobPackageStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_all(&self) -> Result<Vec<Package>, StorageError> {
        match self.backend.get(&self.key)? {
            Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
            _ => Ok(Vec::new()),
        }
    }

    fn load(&self) -> Vec<Package> {
        self.read_all().unwrap_or_else(|e| {
            let error = e.to_string();
            Logger::warn(
                "PACKAGE_STORE_READ_FAILED",
                &[("error", error.as_str()), ("key", self.key.as_str())],
            );
            Vec::new()
        })
    }

    fn save(&self, packages: &[Package]) {
        let result = serde_json::to_string(packages)
            .map_err(StorageError::from)
            .and_then(|blob| self.backend.put(&self.key, &blob));

        if let Err(e) = result {
            let count = packages.len().to_string();
            let error = e.to_string();
            Logger::error(
                "PACKAGE_STORE_WRITE_FAILED",
                &[
                    ("count", count.as_str()),
                    ("error", error.as_str()),
                    ("key", self.key.as_str()),
                ],
            );
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn unique_id(packages: &[Package], now: DateTime<Utc>) -> String {
    loop {
        let id = generate_id(now);
        if !packages.iter().any(|p| p.id == id) {
            return id;
        }
    }
}

impl<B: BlobStore> PackageStore for BlobPackageStore<B> {
    fn create(&self, submission: PackageSubmission) -> Package {
        let _guard = self.lock();
        let mut packages = self.load();

        let now = Utc::now();
        let package = Package::from_submission(unique_id(&packages, now), submission, now);
        packages.push(package.clone());
        self.save(&packages);

        Logger::info(
            "PACKAGE_CREATED",
            &[
                ("id", package.id.as_str()),
                ("package_type", package.package_type.as_str()),
                ("status", package.status.as_str()),
            ],
        );
        package
    }

    fn list(&self) -> Vec<Package> {
        self.load()
    }

    fn get_by_id(&self, id: &str) -> Option<Package> {
        self.load().into_iter().find(|p| p.id == id)
    }

    fn update(&self, id: &str, update: PackageUpdate) -> Option<Package> {
        let _guard = self.lock();
        let mut packages = self.load();

        let package = packages.iter_mut().find(|p| p.id == id)?;
        update.apply_to(package);
        package.updated_at = Utc::now().max(package.created_at);
        let updated = package.clone();
        self.save(&packages);

        Logger::info(
            "PACKAGE_UPDATED",
            &[("id", id), ("status", updated.status.as_str())],
        );
        Some(updated)
    }

    fn delete(&self, id: &str) -> bool {
        let _guard = self.lock();
        let mut packages = self.load();

        let before = packages.len();
        packages.retain(|p| p.id != id);
        if packages.len() == before {
            return false;
        }
        self.save(&packages);

        Logger::info("PACKAGE_DELETED", &[("id", id)]);
        true
    }
}
