//! Session payloads and JSON response bodies exchanged between components.
//!
//! [`SessionData`] and [`OAuthState`] are the payloads sealed into cookies by
//! the session codec; the rest are HTTP response bodies.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cookie payloads
// ---------------------------------------------------------------------------

/// Payload of the signed-in user's session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Display name of the signed-in user.
    pub user_name: String,
    /// Provider login, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// Payload of the short-lived cookie that carries the OAuth `state` parameter
/// between the authorization redirect and the callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    pub state: String,
}

// ---------------------------------------------------------------------------
// Session endpoint
// ---------------------------------------------------------------------------

/// Successful response body for `GET /session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl From<SessionData> for SessionResponse {
    fn from(data: SessionData) -> Self {
        Self {
            signed_in: true,
            user_name: data.user_name,
            login: data.login,
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"session_expired"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"`.
    pub status: String,
    /// Crate version of the running binary.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_data_omits_missing_login() {
        let data = SessionData {
            user_name: "Test User Name".into(),
            login: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"user_name":"Test User Name"}"#);
        let decoded: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn session_response_from_data() {
        let resp = SessionResponse::from(SessionData {
            user_name: "Mona".into(),
            login: Some("octocat".into()),
        });
        assert!(resp.signed_in);
        assert_eq!(resp.login.as_deref(), Some("octocat"));
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("invalid_session", "missing session cookie");
        assert_eq!(e.code, "invalid_session");
        assert!(e.message.contains("missing session cookie"));
    }
}
