//! Package data model
//!
//! `PackageForm` is what a user typed: every field optional and untyped.
//! `PackageSubmission` is a typed, validated form ready for the store.
//! `Package` is a persisted record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Kind of goods being shipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageType {
    Document,
    Parcel,
    Fragile,
    Electronics,
    Clothing,
    Other,
}

impl PackageType {
    pub const ALL: [PackageType; 6] = [
        PackageType::Document,
        PackageType::Parcel,
        PackageType::Fragile,
        PackageType::Electronics,
        PackageType::Clothing,
        PackageType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Document => "Document",
            PackageType::Parcel => "Parcel",
            PackageType::Fragile => "Fragile",
            PackageType::Electronics => "Electronics",
            PackageType::Clothing => "Clothing",
            PackageType::Other => "Other",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("package type", s))
    }
}

/// Delivery progress of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    Pending,
    #[serde(rename = "In Transit", alias = "InTransit")]
    InTransit,
    Delivered,
    Cancelled,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 4] = [
        PackageStatus::Pending,
        PackageStatus::InTransit,
        PackageStatus::Delivered,
        PackageStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::Pending => "Pending",
            PackageStatus::InTransit => "In Transit",
            PackageStatus::Delivered => "Delivered",
            PackageStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InTransit" => Ok(PackageStatus::InTransit),
            _ => PackageStatus::ALL
                .iter()
                .copied()
                .find(|st| st.as_str() == s)
                .ok_or_else(|| ParseEnumError::new("status", s)),
        }
    }
}

/// Unknown enum value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Submission fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SenderName,
    SenderPhone,
    ReceiverName,
    ReceiverPhone,
    PickupLocation,
    DeliveryLocation,
    PackageType,
    Status,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::SenderName,
        Field::SenderPhone,
        Field::ReceiverName,
        Field::ReceiverPhone,
        Field::PickupLocation,
        Field::DeliveryLocation,
        Field::PackageType,
        Field::Status,
    ];

    /// Wire name (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::SenderName => "senderName",
            Field::SenderPhone => "senderPhone",
            Field::ReceiverName => "receiverName",
            Field::ReceiverPhone => "receiverPhone",
            Field::PickupLocation => "pickupLocation",
            Field::DeliveryLocation => "deliveryLocation",
            Field::PackageType => "packageType",
            Field::Status => "status",
        }
    }

    /// Human-readable label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::SenderName => "Sender name",
            Field::SenderPhone => "Sender phone",
            Field::ReceiverName => "Receiver name",
            Field::ReceiverPhone => "Receiver phone",
            Field::PickupLocation => "Pickup location",
            Field::DeliveryLocation => "Delivery location",
            Field::PackageType => "Package type",
            Field::Status => "Status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form data. `None` means the field was not supplied at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PackageForm {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::SenderName => &self.sender_name,
            Field::SenderPhone => &self.sender_phone,
            Field::ReceiverName => &self.receiver_name,
            Field::ReceiverPhone => &self.receiver_phone,
            Field::PickupLocation => &self.pickup_location,
            Field::DeliveryLocation => &self.delivery_location,
            Field::PackageType => &self.package_type,
            Field::Status => &self.status,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::SenderName => &mut self.sender_name,
            Field::SenderPhone => &mut self.sender_phone,
            Field::ReceiverName => &mut self.receiver_name,
            Field::ReceiverPhone => &mut self.receiver_phone,
            Field::PickupLocation => &mut self.pickup_location,
            Field::DeliveryLocation => &mut self.delivery_location,
            Field::PackageType => &mut self.package_type,
            Field::Status => &mut self.status,
        }
    }

    /// Build a form from an arbitrary JSON object.
    ///
    /// Strings are taken as-is, numbers and booleans are stringified so the
    /// validator can report them, `null` counts as absent. Unknown keys are
    /// ignored.
    pub fn from_json(object: &Map<String, Value>) -> Self {
        let mut form = PackageForm::default();
        for field in Field::ALL {
            let value = match object.get(field.as_str()) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            form.set(field, value);
        }
        form
    }
}

impl From<&PackageSubmission> for PackageForm {
    fn from(s: &PackageSubmission) -> Self {
        Self {
            sender_name: Some(s.sender_name.clone()),
            sender_phone: Some(s.sender_phone.clone()),
            receiver_name: Some(s.receiver_name.clone()),
            receiver_phone: Some(s.receiver_phone.clone()),
            pickup_location: Some(s.pickup_location.clone()),
            delivery_location: Some(s.delivery_location.clone()),
            package_type: Some(s.package_type.as_str().to_string()),
            status: Some(s.status.as_str().to_string()),
        }
    }
}

/// Typed package data, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSubmission {
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub package_type: PackageType,
    pub status: PackageStatus,
}

/// A persisted package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub sender_name: String,
    pub sender_phone: String,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub package_type: PackageType,
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Attach identity and timestamps to a submission.
    pub fn from_submission(id: String, submission: PackageSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id,
            sender_name: submission.sender_name,
            sender_phone: submission.sender_phone,
            receiver_name: submission.receiver_name,
            receiver_phone: submission.receiver_phone,
            pickup_location: submission.pickup_location,
            delivery_location: submission.delivery_location,
            package_type: submission.package_type,
            status: submission.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// The user-editable part of the record
    pub fn submission(&self) -> PackageSubmission {
        PackageSubmission {
            sender_name: self.sender_name.clone(),
            sender_phone: self.sender_phone.clone(),
            receiver_name: self.receiver_name.clone(),
            receiver_phone: self.receiver_phone.clone(),
            pickup_location: self.pickup_location.clone(),
            delivery_location: self.delivery_location.clone(),
            package_type: self.package_type,
            status: self.status,
        }
    }
}

/// Partial replacement of a package's editable fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
}

impl PackageUpdate {
    pub fn status(status: PackageStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PackageUpdate::default()
    }

    /// Override the fields present in this update; `id` and timestamps are
    /// left to the caller.
    pub fn apply_to(&self, package: &mut Package) {
        if let Some(v) = &self.sender_name {
            package.sender_name = v.clone();
        }
        if let Some(v) = &self.sender_phone {
            package.sender_phone = v.clone();
        }
        if let Some(v) = &self.receiver_name {
            package.receiver_name = v.clone();
        }
        if let Some(v) = &self.receiver_phone {
            package.receiver_phone = v.clone();
        }
        if let Some(v) = &self.pickup_location {
            package.pickup_location = v.clone();
        }
        if let Some(v) = &self.delivery_location {
            package.delivery_location = v.clone();
        }
        if let Some(v) = self.package_type {
            package.package_type = v;
        }
        if let Some(v) = self.status {
            package.status = v;
        }
    }
}
