use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scantry_core::CoreError;
use serde_json::json;
use std::fmt;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// Boundary error: an HTTP status plus the user-visible message.
///
/// Every externally-facing operation translates core/storage failures to
/// this type at its edge; bodies are always `{ "error": <message> }`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Replacement body for the rare endpoints that add fields next to
    /// `error` (the scan 404 echoes the barcode).
    body: Option<serde_json::Value>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Map a core failure, replacing opaque storage messages with
    /// `context` while keeping the real error in the log.
    pub fn from_core(err: CoreError, context: &str) -> Self {
        match err {
            CoreError::Storage(detail) => {
                error!(context, %detail, "storage failure");
                Self::internal(context)
            }
            other => Self::from(other),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self
            .body
            .unwrap_or_else(|| json!({ "error": self.message }));
        (self.status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => Self::bad_request(message),
            CoreError::NotFound(what) => Self::not_found(match what {
                "product" => "Product not found".to_string(),
                "folder" => "Folder not found".to_string(),
                other => format!("{other} not found"),
            }),
            CoreError::Conflict(message) => Self::conflict(message),
            CoreError::Storage(message) => Self::internal(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}
