//! Field-level validation of package forms
//!
//! Each field is checked independently and reports at most one message: the
//! first rule it breaks. Validation is pure and deterministic.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::types::{Field, PackageForm, PackageStatus, PackageSubmission, PackageType, PackageUpdate};

/// Maximum length of a sender/receiver name, in characters
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of a pickup/delivery location, in characters
pub const MAX_LOCATION_LENGTH: usize = 100;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\s.-]+$").expect("name pattern compiles"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+]?[1-9][0-9]{0,15}$").expect("phone pattern compiles"))
}

/// Field name to message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with errors, in form order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validate every field of a form. Absent fields are reported as required.
pub fn validate(form: &PackageForm) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in Field::ALL {
        if let Some(message) = check_field(field, form.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

/// Validate only the fields present in a partial form.
pub fn validate_partial(patch: &PackageForm) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in Field::ALL {
        if let Some(value) = patch.get(field) {
            if let Some(message) = check_field(field, Some(value)) {
                errors.insert(field, message);
            }
        }
    }
    errors
}

/// Check a single field value, returning the first violated rule's message.
pub fn check_field(field: Field, value: Option<&str>) -> Option<String> {
    let raw = value.unwrap_or("");
    if raw.trim().is_empty() {
        return Some(format!("{} is required", field.label()));
    }

    match field {
        Field::SenderName | Field::ReceiverName => {
            if !name_pattern().is_match(raw) {
                Some(format!(
                    "{} can only contain letters, spaces, periods, and hyphens",
                    field.label()
                ))
            } else if raw.chars().count() > MAX_NAME_LENGTH {
                Some(format!(
                    "{} must be {} characters or less",
                    field.label(),
                    MAX_NAME_LENGTH
                ))
            } else {
                None
            }
        }
        Field::SenderPhone | Field::ReceiverPhone => {
            if phone_pattern().is_match(&strip_whitespace(raw)) {
                None
            } else {
                Some(format!("{} must be a valid phone number", field.label()))
            }
        }
        Field::PickupLocation | Field::DeliveryLocation => {
            if raw.chars().count() > MAX_LOCATION_LENGTH {
                Some(format!(
                    "{} must be {} characters or less",
                    field.label(),
                    MAX_LOCATION_LENGTH
                ))
            } else {
                None
            }
        }
        Field::PackageType => match raw.trim().parse::<PackageType>() {
            Ok(_) => None,
            Err(_) => Some(one_of(field, PackageType::ALL.iter().map(|t| t.as_str()))),
        },
        Field::Status => match raw.trim().parse::<PackageStatus>() {
            Ok(_) => None,
            Err(_) => Some(one_of(field, PackageStatus::ALL.iter().map(|s| s.as_str()))),
        },
    }
}

fn one_of<'a>(field: Field, values: impl Iterator<Item = &'a str>) -> String {
    let values: Vec<&str> = values.collect();
    format!("{} must be one of: {}", field.label(), values.join(", "))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Canonical stored form of a valid field value.
///
/// Text is trimmed and phone numbers lose their internal whitespace.
fn normalize(field: Field, raw: &str) -> String {
    match field {
        Field::SenderPhone | Field::ReceiverPhone => strip_whitespace(raw),
        _ => raw.trim().to_string(),
    }
}

impl TryFrom<&PackageForm> for PackageSubmission {
    type Error = ErrorMap;

    fn try_from(form: &PackageForm) -> Result<Self, ErrorMap> {
        let errors = validate(form);
        if !errors.is_empty() {
            return Err(errors);
        }

        let text = |field: Field| normalize(field, form.get(field).unwrap_or_default());
        let package_type = text(Field::PackageType).parse::<PackageType>();
        let status = text(Field::Status).parse::<PackageStatus>();

        match (package_type, status) {
            (Ok(package_type), Ok(status)) => Ok(PackageSubmission {
                sender_name: text(Field::SenderName),
                sender_phone: text(Field::SenderPhone),
                receiver_name: text(Field::ReceiverName),
                receiver_phone: text(Field::ReceiverPhone),
                pickup_location: text(Field::PickupLocation),
                delivery_location: text(Field::DeliveryLocation),
                package_type,
                status,
            }),
            // Unreachable once validate() passed; keep the error path total.
            (package_type, status) => {
                let mut errors = ErrorMap::new();
                if package_type.is_err() {
                    errors.insert(Field::PackageType, "Package type is invalid");
                }
                if status.is_err() {
                    errors.insert(Field::Status, "Status is invalid");
                }
                Err(errors)
            }
        }
    }
}

impl TryFrom<&PackageForm> for PackageUpdate {
    type Error = ErrorMap;

    /// Converts the fields present in `patch`; absent fields stay untouched.
    fn try_from(patch: &PackageForm) -> Result<Self, ErrorMap> {
        let errors = validate_partial(patch);
        if !errors.is_empty() {
            return Err(errors);
        }

        let text = |field: Field| patch.get(field).map(|raw| normalize(field, raw));
        Ok(PackageUpdate {
            sender_name: text(Field::SenderName),
            sender_phone: text(Field::SenderPhone),
            receiver_name: text(Field::ReceiverName),
            receiver_phone: text(Field::ReceiverPhone),
            pickup_location: text(Field::PickupLocation),
            delivery_location: text(Field::DeliveryLocation),
            package_type: text(Field::PackageType).and_then(|s| s.parse().ok()),
            status: text(Field::Status).and_then(|s| s.parse().ok()),
        })
    }
}

impl PackageSubmission {
    /// Run the form rules against an already-typed submission.
    pub fn validate(&self) -> ErrorMap {
        validate(&PackageForm::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PackageForm {
        let mut form = PackageForm::default();
        form.set(Field::SenderName, "Jane Doe");
        form.set(Field::SenderPhone, "+14155550123");
        form.set(Field::ReceiverName, "J. Smith");
        form.set(Field::ReceiverPhone, "14155550199");
        form.set(Field::PickupLocation, "221B Baker St");
        form.set(Field::DeliveryLocation, "10 Downing St");
        form.set(Field::PackageType, "Parcel");
        form.set(Field::Status, "Pending");
        form
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_flags_every_field() {
        let errors = validate(&PackageForm::default());
        assert_eq!(errors.len(), Field::ALL.len());
        assert_eq!(errors.get(Field::SenderName), Some("Sender name is required"));
        assert_eq!(errors.get(Field::Status), Some("Status is required"));
    }

    #[test]
    fn test_name_first_violation_wins() {
        // Both a bad character and too long: only the pattern message is kept.
        let mut form = valid_form();
        form.set(Field::ReceiverName, format!("{}1", "a".repeat(60)));
        let errors = validate(&form);

        assert_eq!(
            errors.get(Field::ReceiverName),
            Some("Receiver name can only contain letters, spaces, periods, and hyphens")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_name_length_boundary() {
        let mut form = valid_form();
        form.set(Field::SenderName, "a".repeat(MAX_NAME_LENGTH));
        assert!(validate(&form).is_empty());

        form.set(Field::SenderName, "a".repeat(MAX_NAME_LENGTH + 1));
        assert_eq!(
            validate(&form).get(Field::SenderName),
            Some("Sender name must be 50 characters or less")
        );
    }

    #[test]
    fn test_phone_rules() {
        for ok in ["+14155550123", "1", "1 415 555 0123", "9999999999999999"] {
            assert_eq!(check_field(Field::SenderPhone, Some(ok)), None, "{ok}");
        }
        for bad in ["0123", "+", "++1", "12345678901234567", "415-555", "１２３"] {
            assert!(check_field(Field::SenderPhone, Some(bad)).is_some(), "{bad}");
        }
    }

    #[test]
    fn test_location_length() {
        assert!(check_field(Field::PickupLocation, Some("x".repeat(100).as_str())).is_none());
        assert_eq!(
            check_field(Field::DeliveryLocation, Some("x".repeat(101).as_str())).as_deref(),
            Some("Delivery location must be 100 characters or less")
        );
    }

    #[test]
    fn test_enum_fields() {
        assert!(check_field(Field::Status, Some("In Transit")).is_none());
        assert!(check_field(Field::Status, Some("InTransit")).is_none());
        assert_eq!(
            check_field(Field::PackageType, Some("Banana")).as_deref(),
            Some("Package type must be one of: Document, Parcel, Fragile, Electronics, Clothing, Other")
        );
    }

    #[test]
    fn test_submission_conversion_normalizes() {
        let mut form = valid_form();
        form.set(Field::SenderName, "  Jane Doe ");
        form.set(Field::SenderPhone, "+1 415 555 0123");

        let submission = PackageSubmission::try_from(&form).unwrap();
        assert_eq!(submission.sender_name, "Jane Doe");
        assert_eq!(submission.sender_phone, "+14155550123");
        assert_eq!(submission.package_type, PackageType::Parcel);
        assert!(submission.validate().is_empty());
    }

    #[test]
    fn test_submission_conversion_rejects_invalid() {
        let mut form = valid_form();
        form.status = None;
        let errors = PackageSubmission::try_from(&form).unwrap_err();
        assert!(errors.contains(Field::Status));
    }

    #[test]
    fn test_partial_validation_ignores_absent_fields() {
        let mut patch = PackageForm::default();
        patch.set(Field::Status, "Delivered");
        assert!(validate_partial(&patch).is_empty());

        let update = PackageUpdate::try_from(&patch).unwrap();
        assert_eq!(update, PackageUpdate::status(PackageStatus::Delivered));

        patch.set(Field::SenderName, "R2D2");
        let errors = PackageUpdate::try_from(&patch).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::SenderName]);
    }

    #[test]
    fn test_error_map_serializes_by_field_name() {
        let errors = validate(&PackageForm::default());
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["senderPhone"], "Sender phone is required");
        assert_eq!(value.as_object().unwrap().len(), 8);
    }
}
