//! Package HTTP Routes
//!
//! `POST /api/packages` keeps the form endpoint contract:
//! - 500 `{message}` when the body is not parseable JSON, whatever its
//!   `Content-Type`
//! - 400 `{message, missingFields}` when a required field is absent or falsy
//! - 422 `{message, errors}` when a present field fails validation
//! - 200 `{message, package}` on success
//!
//! The remaining routes expose the rest of the store.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::observability::Logger;
use crate::package::{ErrorMap, Field, Package, PackageForm, PackageStore, PackageSubmission, PackageUpdate};

// ==================
// Shared State
// ==================

/// Package state shared across handlers
pub struct PackageState {
    pub store: Arc<dyn PackageStore>,
}

impl PackageState {
    pub fn new(store: Arc<dyn PackageStore>) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CreatePackageResponse {
    pub message: String,
    pub package: Package,
}

#[derive(Debug, Serialize)]
pub struct PackagesListResponse {
    pub packages: Vec<Package>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<Field>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorMap>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            missing_fields: None,
            errors: None,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, body: ErrorResponse) -> ApiError {
    (status, Json(body))
}

fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, ErrorResponse::message("Package not found"))
}

fn invalid(errors: ErrorMap) -> ApiError {
    api_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorResponse {
            message: "Validation failed".to_string(),
            missing_fields: None,
            errors: Some(errors),
        },
    )
}

// ==================
// Package Routes
// ==================

/// Create package routes
pub fn package_routes(state: Arc<PackageState>) -> Router {
    Router::new()
        .route(
            "/api/packages",
            get(list_packages_handler).post(create_package_handler),
        )
        .route(
            "/api/packages/:id",
            get(get_package_handler)
                .patch(update_package_handler)
                .delete(delete_package_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// JavaScript-style falsiness: absent, `null`, `false`, `0` and `""`.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Required fields that are absent or falsy, in form order
pub fn missing_fields(body: &Value) -> Vec<Field> {
    let object = body.as_object();
    Field::ALL
        .into_iter()
        .filter(|field| is_falsy(object.and_then(|o| o.get(field.as_str()))))
        .collect()
}

// ==================
// Handlers
// ==================

async fn create_package_handler(
    State(state): State<Arc<PackageState>>,
    body: Bytes,
) -> Result<Json<CreatePackageResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        let reason = e.to_string();
        Logger::error("PACKAGE_CREATE_FAILED", &[("reason", reason.as_str())]);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::message("Internal server error"),
        )
    })?;

    let missing = missing_fields(&body);
    if !missing.is_empty() {
        let count = missing.len().to_string();
        Logger::info(
            "PACKAGE_CREATE_REJECTED",
            &[("missing", count.as_str()), ("reason", "missing_fields")],
        );
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                message: "Missing required fields".to_string(),
                missing_fields: Some(missing),
                errors: None,
            },
        ));
    }

    let empty = Map::new();
    let form = PackageForm::from_json(body.as_object().unwrap_or(&empty));
    let submission = PackageSubmission::try_from(&form).map_err(|errors| {
        let count = errors.len().to_string();
        Logger::info(
            "PACKAGE_CREATE_REJECTED",
            &[("invalid", count.as_str()), ("reason", "validation")],
        );
        invalid(errors)
    })?;

    let package = state.store.create(submission);

    Ok(Json(CreatePackageResponse {
        message: "Package created successfully".to_string(),
        package,
    }))
}

async fn list_packages_handler(
    State(state): State<Arc<PackageState>>,
) -> Json<PackagesListResponse> {
    let packages = state.store.list();
    Json(PackagesListResponse {
        total: packages.len(),
        packages,
    })
}

async fn get_package_handler(
    State(state): State<Arc<PackageState>>,
    Path(id): Path<String>,
) -> Result<Json<Package>, ApiError> {
    state.store.get_by_id(&id).map(Json).ok_or_else(not_found)
}

async fn update_package_handler(
    State(state): State<Arc<PackageState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Package>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        api_error(rejection.status(), ErrorResponse::message(rejection.body_text()))
    })?;

    let object = body.as_object().ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            ErrorResponse::message("Request body must be a JSON object"),
        )
    })?;

    let patch = PackageForm::from_json(object);
    let update = PackageUpdate::try_from(&patch).map_err(invalid)?;

    state.store.update(&id, update).map(Json).ok_or_else(not_found)
}

async fn delete_package_handler(
    State(state): State<Arc<PackageState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
