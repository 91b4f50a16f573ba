//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Error bodies use the `{"detail": ...}` shape the
//! API has always spoken.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;
use crate::services::token::TokenError;

/// Application-level error type.
///
/// One variant per failure kind the HTTP contract distinguishes; the
/// status-code mapping below is the whole contract surfaced to clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// An account with this email already exists.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Login failed. Never distinguishes unknown email from wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or invalid bearer credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but the caller's role is not allowed here.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transient store failure; surfaced as 503, retry is the caller's call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(sqlx::Error),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => Self::StoreUnavailable(e),
            RepositoryError::DataCorruption(msg) => Self::Internal(msg),
            RepositoryError::NotFound => Self::NotFound("resource".to_owned()),
            RepositoryError::Conflict(msg) => Self::InvalidRequest(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(e) => Self::InvalidRequest(format!("invalid email: {e}")),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::DuplicateEmail => Self::DuplicateEmail,
            AuthError::WeakPassword(msg) => Self::InvalidRequest(msg),
            AuthError::UserNotFound => Self::NotFound("user".to_owned()),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_owned()),
            AuthError::Token(e) => Self::Internal(format!("token issuance failed: {e}")),
            AuthError::Repository(e) => e.into(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Empty | OrderError::InvalidQuantity | OrderError::TotalOutOfRange => {
                Self::InvalidRequest(err.to_string())
            }
            OrderError::UnknownProduct => Self::InvalidRequest("unknown product id".to_owned()),
            OrderError::Repository(e) => e.into(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::Unauthenticated("invalid token".to_owned()),
            TokenError::Signing(e) => Self::Internal(format!("token signing failed: {e}")),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateEmail | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side detail stays in the logs.
    fn detail(&self) -> String {
        match self {
            Self::DuplicateEmail => "Email already registered".to_owned(),
            Self::InvalidCredentials => "Invalid credentials".to_owned(),
            Self::Unauthenticated(msg) => msg.clone(),
            Self::Forbidden => "Forbidden".to_owned(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::InvalidRequest(msg) => msg.clone(),
            Self::StoreUnavailable(_) => "Service temporarily unavailable".to_owned(),
            Self::Internal(_) => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::StoreUnavailable(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let body = Json(serde_json::json!({ "detail": self.detail() }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product".to_string());
        assert_eq!(err.to_string(), "Not found: product");

        let err = AppError::InvalidRequest("unknown product id".to_string());
        assert_eq!(err.to_string(), "Invalid request: unknown product id");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::DuplicateEmail), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Unauthenticated("missing bearer token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::NotFound("user".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::InvalidRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = AppError::Internal("connection string was postgres://...".to_string());
        assert_eq!(err.detail(), "Internal server error");
    }

    #[test]
    fn test_order_error_mapping() {
        let err: AppError = OrderError::UnknownProduct.into();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);

        let err: AppError = OrderError::Empty.into();
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            get_status(AuthError::DuplicateEmail.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AuthError::UserNotFound.into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_token_error_maps_to_unauthenticated() {
        assert_eq!(
            get_status(TokenError::Invalid.into()),
            StatusCode::UNAUTHORIZED
        );
    }
}
