//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::cookie::CookieError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a request was treated as unauthenticated
///
/// Only ever logged. Callers see a single 401 whatever the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No session cookie was presented
    MissingToken,
    /// Token unknown: never issued, revoked, rotated away, or just evicted
    NotFound,
    /// Token found but past its expiry (evicted on discovery)
    Expired,
    /// Token live but no replacement could be allocated; the old session is kept
    RotationFailed,
}

impl SessionRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRejection::MissingToken => "missing_token",
            SessionRejection::NotFound => "not_found",
            SessionRejection::Expired => "expired",
            SessionRejection::RotationFailed => "rotation_failed",
        }
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Body or cookie header could not be parsed
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Invalid credentials (unknown user or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session missing, not found or expired
    #[error("Session not found or expired")]
    Unauthenticated(SessionRejection),

    /// Generator kept colliding with live tokens
    #[error("Could not allocate a unique session token")]
    TokenSpaceExhausted,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::TokenSpaceExhausted | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MalformedRequest(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated(_) => {
                ErrorKind::Unauthorized
            }
            AuthError::TokenSpaceExhausted | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenSpaceExhausted => {
                tracing::error!("Session token generator exhausted its retries");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::MalformedRequest(reason) => {
                tracing::warn!(reason = %reason, "Malformed auth request");
            }
            AuthError::Unauthenticated(rejection) => {
                tracing::debug!(reason = rejection.as_str(), "Unauthenticated request");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::MalformedRequest(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<CookieError> for AuthError {
    fn from(err: CookieError) -> Self {
        AuthError::MalformedRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::MalformedRequest("bad json".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Unauthenticated(SessionRejection::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::TokenSpaceExhausted.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_reasons_share_one_message() {
        let missing = AuthError::Unauthenticated(SessionRejection::MissingToken).to_string();
        let not_found = AuthError::Unauthenticated(SessionRejection::NotFound).to_string();
        let expired = AuthError::Unauthenticated(SessionRejection::Expired).to_string();

        assert_eq!(missing, not_found);
        assert_eq!(not_found, expired);
    }

    #[test]
    fn test_kind_matches_status() {
        for err in [
            AuthError::MalformedRequest("x".into()),
            AuthError::InvalidCredentials,
            AuthError::Unauthenticated(SessionRejection::NotFound),
            AuthError::Internal("x".into()),
        ] {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::bad_request("JSON parse error").into();
        assert!(matches!(err, AuthError::MalformedRequest(_)));

        let err: AuthError = AppError::internal("boom").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn test_from_cookie_error() {
        let err: AuthError = CookieError::InvalidHeader.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_response_body_is_empty() {
        let response = AuthError::Unauthenticated(SessionRejection::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
