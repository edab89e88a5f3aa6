use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// User-facing message constants shared across operations and handlers.
pub mod msg {
    pub const VALIDATION_FAILED: &str = "Validation failed. Please check your inputs.";
    pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
    pub const ORDER_NOT_FOUND: &str = "Order not found.";
    pub const SELL_REQUEST_NOT_FOUND: &str = "Sell request not found.";
    pub const APP_NOT_FOUND: &str = "App not found.";
    pub const STORE_FAILURE: &str = "An unexpected error occurred. Please try again.";
    pub const SELL_REQUEST_RECEIVED: &str = "Your request has been submitted!";
}

/// Field name to message mapping produced by input validation.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed schema validation. Carries the field error map;
    /// nothing has been written when this is returned.
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                fields.insert(field.to_string(), message);
            }
        }
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, field_errors) = match self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed",
                Some(msg::VALIDATION_FAILED.to_string()),
                Some(fields),
            ),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "Not found", Some(m), None),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, "Bad request", Some(m), None),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg::STORE_FAILURE.to_string()),
                    None,
                )
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg::STORE_FAILURE.to_string()),
                    None,
                )
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid JSON",
                    Some(e.to_string()),
                    None,
                )
            }
            AppError::Internal(m) => {
                tracing::error!("Internal error: {}", m);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg::STORE_FAILURE.to_string()),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
            field_errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Convert `Option` lookups into `NotFound` errors without sprinkling
/// `ok_or_else` closures through every operation.
pub trait OptionExt<T> {
    fn or_not_found(self, message: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self, message: &str) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
