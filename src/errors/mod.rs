//! Error handling module for the saloon backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
    pub const SNAPSHOT_ERROR: &str = "SNAPSHOT_ERROR";
}

/// Messages returned to callers. Internal causes never reach the response body.
pub mod messages {
    pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
    pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required.";
    pub const SALOON_NOT_FOUND: &str = "Saloon not found.";
    pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
    pub const INTERNAL_ERROR: &str = "Internal server error.";
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is missing, empty or has the wrong type
    #[error("{message} (field: {field})")]
    Validation {
        message: &'static str,
        field: &'static str,
    },
    /// No saloon carries the requested id
    #[error("saloon not found: {0}")]
    NotFound(String),
    /// Email/password pair did not match any saloon
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The snapshot could not be written
    #[error("persistence error: {0}")]
    Persistence(String),
    /// The snapshot exists but could not be read back as a saloon list
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl AppError {
    /// Validation error for a missing field, using the generic create/edit/setup message.
    pub fn missing(field: &'static str) -> Self {
        AppError::Validation {
            message: messages::ALL_FIELDS_REQUIRED,
            field,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Persistence(_) | AppError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::InvalidCredentials => codes::INVALID_CREDENTIALS,
            AppError::Persistence(_) => codes::PERSISTENCE_ERROR,
            AppError::Snapshot(_) => codes::SNAPSHOT_ERROR,
        }
    }

    /// Get the caller-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::Validation { message, .. } => *message,
            AppError::NotFound(_) => messages::SALOON_NOT_FOUND,
            AppError::InvalidCredentials => messages::INVALID_CREDENTIALS,
            AppError::Persistence(_) | AppError::Snapshot(_) => messages::INTERNAL_ERROR,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persistence(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(format!("JSON error: {}", err))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        Self {
            success: false,
            message: error.message().to_string(),
            code: error.error_code().to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}
