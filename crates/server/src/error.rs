//! Request-level error type.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! each variant to a status code and a `{"message": ...}` JSON body. Internal
//! details are logged, never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::auth::AuthError;
use crate::store::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Request body or path segment failed validation.
    #[error("{0}")]
    Validation(String),

    /// No authenticated session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unknown username or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal server error")]
    Internal(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateUsername => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Internal(_) => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::UsernameTaken => Self::DuplicateUsername,
            AuthError::Storage(err) => Self::Storage(err),
            AuthError::Hash(_) => Self::Internal(Box::new(err)),
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(Box::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("bad".to_owned()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotFound("Product").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateUsername.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Storage(crate::store::StorageError::DataCorruption(
            "cart row vanished".to_owned(),
        ));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            AppError::NotFound("Product").public_message(),
            "Product not found"
        );
    }
}
