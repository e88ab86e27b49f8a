use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::storage::StorageError;
use crate::auth::AuthError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Auth(e) => auth_error_parts(e),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Session storage is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn auth_error_parts(error: &AuthError) -> (StatusCode, &'static str, String) {
    match error {
        AuthError::UserNotFound | AuthError::PasswordTooShort => {
            (StatusCode::UNAUTHORIZED, "LOGIN_FAILED", error.to_string())
        }
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        AuthError::EmailTaken => (StatusCode::CONFLICT, "EMAIL_TAKEN", error.to_string()),
        AuthError::Rejected { status, message } if *status < 500 => {
            (StatusCode::UNAUTHORIZED, "LOGIN_FAILED", message.clone())
        }
        AuthError::Rejected { .. } | AuthError::ProfileMissing(_) | AuthError::Http(_) => {
            tracing::error!("Auth provider error: {error}");
            (
                StatusCode::BAD_GATEWAY,
                "AUTH_PROVIDER_ERROR",
                "The authentication service is unavailable".to_string(),
            )
        }
    }
}
