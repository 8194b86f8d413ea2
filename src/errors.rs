//! Centralized error handling.
//!
//! Provides the authentication error taxonomy and a unified application
//! error type with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::errors::ErrorKind;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::config::AUTH_FAILURE_MESSAGE;

/// Local (username/password) verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("unknown user")]
    UnknownUser,

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Bearer token failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("missing bearer token")]
    Missing,

    #[error("malformed token")]
    Malformed,

    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("unknown subject")]
    UnknownSubject,
}

/// User record store failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("record not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),
}

/// Uniform failure of an authentication strategy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) | AppError::Token(_) => {
                "UNAUTHORIZED"
            }
            AppError::NotFound | AppError::Store(StoreError::NotFound) => "NOT_FOUND",
            AppError::Conflict(_)
            | AppError::ConcurrentModification(_)
            | AppError::Store(StoreError::Conflict(_)) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Store(StoreError::Unavailable(_)) => "STORE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) | AppError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound | AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Conflict(_)
            | AppError::ConcurrentModification(_)
            | AppError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Local and bearer failures share one message so callers
            // cannot tell unknown users from wrong passwords.
            AppError::Authentication(_) | AppError::Token(_) => {
                AUTH_FAILURE_MESSAGE.to_string()
            }

            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),
            AppError::ConcurrentModification(what) => {
                format!("{} was modified concurrently, retry the request", what)
            }

            // Hide details for internal errors
            AppError::Store(StoreError::Unavailable(e)) => {
                tracing::error!("Store unavailable: {}", e);
                "The data store is unavailable".to_string()
            }
            AppError::Store(StoreError::Conflict(e)) => {
                tracing::warn!("Store conflict: {}", e);
                "Resource already exists".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            AppError::NotFound | AppError::Store(StoreError::NotFound) => {
                "Resource not found".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Authentication(e) => AppError::Authentication(e),
            AuthError::Token(e) => AppError::Token(e),
            AuthError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return StoreError::Conflict(detail);
        }

        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StoreError::NotFound,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Store(StoreError::from(err))
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_auth_failures_share_status_and_message() {
        let failures = vec![
            AppError::from(AuthenticationError::UnknownUser),
            AppError::from(AuthenticationError::InvalidCredentials),
            AppError::from(TokenError::Missing),
            AppError::from(TokenError::Malformed),
            AppError::from(TokenError::BadSignature),
            AppError::from(TokenError::Expired),
            AppError::from(TokenError::UnknownSubject),
        ];

        for failure in failures {
            let (status, body) = body_json(failure).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"]["code"], "UNAUTHORIZED");
            assert_eq!(body["error"]["message"], AUTH_FAILURE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_store_errors_map_to_server_side_statuses() {
        let (status, body) = body_json(AppError::from(StoreError::Unavailable(
            "connection refused".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");
        assert!(!body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("connection refused"));

        let (status, _) = body_json(AppError::from(StoreError::NotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_auth_error_conversion_keeps_kind() {
        let err = AppError::from(AuthError::Token(TokenError::Expired));
        assert!(matches!(err, AppError::Token(TokenError::Expired)));

        let err = AppError::from(AuthError::Store(StoreError::NotFound));
        assert!(matches!(err, AppError::Store(StoreError::NotFound)));
    }

    #[test]
    fn test_db_record_not_found_maps_to_not_found() {
        let err = StoreError::from(DbErr::RecordNotFound("users".to_string()));
        assert_eq!(err, StoreError::NotFound);

        let err = StoreError::from(DbErr::Conn(sea_orm::RuntimeErr::Internal(
            "refused".to_string(),
        )));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_jwt_error_kinds_map_to_token_errors() {
        use jsonwebtoken::errors::Error;

        assert_eq!(
            TokenError::from(Error::from(ErrorKind::InvalidSignature)),
            TokenError::BadSignature
        );
        assert_eq!(
            TokenError::from(Error::from(ErrorKind::ExpiredSignature)),
            TokenError::Expired
        );
        assert_eq!(
            TokenError::from(Error::from(ErrorKind::InvalidToken)),
            TokenError::Malformed
        );
    }
}
