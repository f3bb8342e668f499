use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use stride_auth::error::AuthError;
use stride_auth::validate::FieldIssue;
use stride_export::error::ExportError;
use stride_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Validation(Vec<FieldIssue>),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Access denied", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Invalid token", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg, None),
            ApiError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                "Validation failed",
                "Please check your input".to_string(),
                Some(issues),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Something went wrong on our end".to_string(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error,
                message,
                details,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => {
                ApiError::NotFound(format!("Report file not found: {key}"))
            }
            StorageError::InvalidKey { .. } => {
                ApiError::BadRequest("Filename contains invalid characters".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Email or password is incorrect".to_string())
            }
            AuthError::UserExists(_) => {
                ApiError::Conflict("A user with this email address already exists".to_string())
            }
            AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                ApiError::Forbidden("Token is expired or invalid".to_string())
            }
            AuthError::UserNotFound(_) => ApiError::Forbidden(
                "User associated with token no longer exists".to_string(),
            ),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
