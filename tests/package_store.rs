//! Package Store Tests
//!
//! CRUD semantics over both blob backends:
//! - create then get_by_id returns an equal record
//! - ids are unique, created_at <= updated_at
//! - update touches only the given fields and updated_at
//! - delete removes; deleting an unknown id is a no-op returning false
//! - a missing or corrupt blob reads as an empty collection

use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use zippy::package::{
    BlobPackageStore, PackageStatus, PackageStore, PackageSubmission, PackageType, PackageUpdate,
    DEFAULT_STORAGE_KEY,
};
use zippy::storage::{BlobStore, LocalBlobStore, MemoryBlobStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn submission() -> PackageSubmission {
    PackageSubmission {
        sender_name: "Jane Doe".to_string(),
        sender_phone: "+14155550123".to_string(),
        receiver_name: "J. Smith".to_string(),
        receiver_phone: "14155550199".to_string(),
        pickup_location: "221B Baker St".to_string(),
        delivery_location: "10 Downing St".to_string(),
        package_type: PackageType::Parcel,
        status: PackageStatus::Pending,
    }
}

fn memory_store() -> BlobPackageStore<MemoryBlobStore> {
    BlobPackageStore::new(MemoryBlobStore::new())
}

fn file_store(dir: &TempDir) -> BlobPackageStore<LocalBlobStore> {
    BlobPackageStore::new(LocalBlobStore::new(dir.path()))
}

// =============================================================================
// Create / Read Tests
// =============================================================================

#[test]
fn test_create_example_submission() {
    let store = memory_store();
    let package = store.create(submission());

    assert!(!package.id.is_empty());
    assert_eq!(package.created_at, package.updated_at);
    assert_eq!(package.sender_name, "Jane Doe");
    assert_eq!(package.receiver_phone, "14155550199");
    assert_eq!(package.package_type, PackageType::Parcel);
    assert_eq!(package.status, PackageStatus::Pending);
}

#[test]
fn test_create_then_get_is_equal() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);

    let created = store.create(submission());
    assert_eq!(store.get_by_id(&created.id), Some(created));
}

#[test]
fn test_identical_submissions_get_distinct_ids() {
    let store = memory_store();
    let a = store.create(submission());
    let b = store.create(submission());

    assert_ne!(a.id, b.id);
    assert_eq!(store.list().len(), 2);
}

#[test]
fn test_list_preserves_insertion_order() {
    let store = memory_store();
    let ids: Vec<String> = (0..5).map(|_| store.create(submission()).id).collect();

    let listed: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_list_is_a_snapshot() {
    let store = memory_store();
    store.create(submission());

    let snapshot = store.list();
    store.create(submission());
    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.list().len(), 2);
}

#[test]
fn test_get_unknown_id() {
    let store = memory_store();
    store.create(submission());
    assert!(store.get_by_id("does-not-exist").is_none());
}

// =============================================================================
// Update Tests
// =============================================================================

/// Updating status changes only status and updated_at.
#[test]
fn test_update_status_only() {
    let store = memory_store();
    let created = store.create(submission());

    let updated = store
        .update(&created.id, PackageUpdate::status(PackageStatus::Delivered))
        .unwrap();

    assert_eq!(updated.status, PackageStatus::Delivered);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let mut expected = created.clone();
    expected.status = PackageStatus::Delivered;
    expected.updated_at = updated.updated_at;
    assert_eq!(updated, expected);
    assert_eq!(store.get_by_id(&created.id), Some(updated));
}

#[test]
fn test_update_multiple_fields() {
    let store = memory_store();
    let created = store.create(submission());

    let update = PackageUpdate {
        delivery_location: Some("1600 Pennsylvania Ave".to_string()),
        package_type: Some(PackageType::Fragile),
        ..Default::default()
    };
    let updated = store.update(&created.id, update).unwrap();

    assert_eq!(updated.delivery_location, "1600 Pennsylvania Ave");
    assert_eq!(updated.package_type, PackageType::Fragile);
    assert_eq!(updated.pickup_location, created.pickup_location);
}

#[test]
fn test_update_unknown_id() {
    let store = memory_store();
    let created = store.create(submission());

    assert!(store
        .update("nope", PackageUpdate::status(PackageStatus::Cancelled))
        .is_none());
    assert_eq!(store.list(), vec![created]);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_get_is_absent() {
    let store = memory_store();
    let keep = store.create(submission());
    let gone = store.create(submission());

    assert!(store.delete(&gone.id));
    assert!(store.get_by_id(&gone.id).is_none());
    assert_eq!(store.list(), vec![keep]);
}

#[test]
fn test_delete_unknown_leaves_collection_unchanged() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    store.create(submission());
    let before = store.backend().get(DEFAULT_STORAGE_KEY).unwrap();

    assert!(!store.delete("unknown"));
    assert_eq!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap(), before);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_missing_blob_is_empty() {
    let temp = TempDir::new().unwrap();
    assert!(file_store(&temp).list().is_empty());
}

#[test]
fn test_corrupt_blob_is_empty() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("zippy-packages.json"), "[{\"id\": 1").unwrap();

    let store = file_store(&temp);
    assert!(store.list().is_empty());
    assert!(!store.delete("anything"));
}

#[test]
fn test_blob_is_a_json_array_of_packages() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let created = store.create(submission());

    let raw = std::fs::read_to_string(temp.path().join("zippy-packages.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["id"], created.id.as_str());
    assert_eq!(array[0]["senderName"], "Jane Doe");
    assert!(array[0]["createdAt"].is_string());
}

#[test]
fn test_reopened_store_sees_previous_writes() {
    let temp = TempDir::new().unwrap();
    let created = file_store(&temp).create(submission());

    let reopened = file_store(&temp);
    assert_eq!(reopened.list(), vec![created]);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// Concurrent creates through one store instance do not lose records.
#[test]
fn test_concurrent_creates_in_one_process() {
    let store: Arc<dyn PackageStore> = Arc::new(memory_store());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..10 {
                    store.create(submission());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.list().len(), 80);
}
