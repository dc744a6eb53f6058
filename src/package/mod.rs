//! # Packages
//!
//! Delivery package records: the data model, form validation, and the
//! CRUD store.
//!
//! A submission flows through [`validate`] (or `PackageSubmission::try_from`
//! on a raw [`PackageForm`]) and then into [`PackageStore::create`], which
//! assigns the id and timestamps.

mod id;
mod store;
mod types;
mod validator;

pub use id::{generate_id, to_base36};
pub use store::{BlobPackageStore, PackageStore, DEFAULT_STORAGE_KEY};
pub use types::{
    Field, Package, PackageForm, PackageStatus, PackageSubmission, PackageType, PackageUpdate,
    ParseEnumError,
};
pub use validator::{
    check_field, validate, validate_partial, ErrorMap, MAX_LOCATION_LENGTH, MAX_NAME_LENGTH,
};
