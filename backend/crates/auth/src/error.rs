//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// CPF is not exactly 11 decimal digits
    #[error("Invalid CPF: must be exactly 11 digits")]
    InvalidCpf,

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password rejected by the policy
    #[error("Password rejected: {0}")]
    WeakPassword(String),

    /// Required profile field is missing or blank
    #[error("Required field is missing: {0}")]
    MissingField(&'static str),

    /// CPF already registered
    #[error("CPF already registered")]
    CpfTaken,

    /// No user record for this CPF
    #[error("User not found")]
    UserNotFound,

    /// Account exists but access has not been granted
    #[error("Access not granted for this account")]
    AccessBlocked,

    /// Wrong password
    #[error("Invalid credentials")]
    BadCredentials,

    /// Session token missing, malformed, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Admin-only operation attempted by a non-admin
    #[error("Administrator privileges required")]
    Unauthorized,

    /// Reset token unknown, expired, or already used
    #[error("Password reset token is not valid")]
    ResetInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCpf
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword(_)
            | AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::CpfTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::AccessBlocked | AuthError::Unauthorized => StatusCode::FORBIDDEN,
            AuthError::BadCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::ResetInvalid => StatusCode::GONE,
            AuthError::Database(e) if is_unavailable(e) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCpf
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword(_)
            | AuthError::MissingField(_) => ErrorKind::BadRequest,
            AuthError::CpfTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::AccessBlocked | AuthError::Unauthorized => ErrorKind::Forbidden,
            AuthError::BadCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::ResetInvalid => ErrorKind::Gone,
            AuthError::Database(e) if is_unavailable(e) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::BadCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccessBlocked => {
                tracing::warn!("Login attempt on blocked account");
            }
            AuthError::Unauthorized => {
                tracing::warn!("Admin operation attempted without privileges");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Connection-level failures degrade to 503 instead of 500
fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(AuthError::InvalidCpf.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::PasswordMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::CpfTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::AccessBlocked.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::BadCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::ResetInvalid.status_code(), StatusCode::GONE);
    }

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }
}
