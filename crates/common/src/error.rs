//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::InvalidSession`] → 401
/// - [`ServiceError::SessionExpired`] → 401
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No session cookie, or one that is malformed, forged or undecodable.
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// The session cookie is genuine but older than the allowed maximum age.
    #[error("session expired")]
    SessionExpired,

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidSession(_) => 401,
            ServiceError::SessionExpired => 401,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse`](crate::protocol::ErrorResponse) bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidSession(_) => "invalid_session",
            ServiceError::SessionExpired => "session_expired",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::InvalidSession("x".into()).http_status(), 401);
        assert_eq!(ServiceError::SessionExpired.http_status(), 401);
        assert_eq!(ServiceError::NotFound("x".into()).http_status(), 404);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn expired_and_invalid_have_distinct_codes() {
        assert_eq!(ServiceError::SessionExpired.code(), "session_expired");
        assert_eq!(
            ServiceError::InvalidSession("x".into()).code(),
            "invalid_session"
        );
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::InvalidSession("missing session cookie".into());
        assert!(e.to_string().contains("missing session cookie"));
    }
}
