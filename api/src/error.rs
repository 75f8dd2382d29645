//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use verdict_engine::EngineError;
use verdict_store::StoreError;

/// Errors surfaced to HTTP clients.
///
/// Every variant renders as `{"success": false, "message": ...}` with the
/// matching status code. `Internal` logs its detail and sends a generic
/// message; store and verifier internals are never exposed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed internally");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            StoreError::DuplicateEmail(_) => {
                ApiError::Conflict("User with this email already exists".to_string())
            }
            StoreError::DuplicatePhone(_) => ApiError::Conflict(
                "Phone number is already registered by another user".to_string(),
            ),
            StoreError::IllegalTransition { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            // The original surface reports a completed KYC as a bad request,
            // not a conflict.
            EngineError::AlreadyVerified(_) => {
                ApiError::Validation("KYC is already completed for this user".to_string())
            }
            EngineError::VerificationInFlight(_) => ApiError::Conflict(
                "A verification is already in progress for this user".to_string(),
            ),
            EngineError::Store(inner) => inner.into(),
        }
    }
}
