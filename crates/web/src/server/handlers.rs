//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse, OAuthState, SessionData, SessionResponse};
use common::ServiceError;
use session_codec::SessionError;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::{cookie, pages, state::AppState, state::OAUTH_STATE_COOKIE};
use crate::github;

/// `GET /` — index page showing whether the visitor is signed in.
///
/// An invalid or expired session cookie is treated as signed out.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let session = match load_session(&state, &headers) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!(reason = e.code(), "rendering index as signed out");
            None
        }
    };
    Html(pages::index(session.as_ref()))
}

/// `GET /session` — JSON view of the current session.
///
/// Returns `401` with `session_expired` for a genuine but stale cookie and
/// `invalid_session` for anything else.
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match load_session(&state, &headers) {
        Ok(data) => (StatusCode::OK, Json(SessionResponse::from(data))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /oauth/github/start` — begin the GitHub OAuth flow.
///
/// Stores a fresh random `state` in a short-lived sealed cookie and redirects
/// the browser to GitHub's authorization page.
pub async fn oauth_start(State(state): State<AppState>) -> Response {
    let oauth_state = OAuthState {
        state: Uuid::new_v4().simple().to_string(),
    };

    let token = match state
        .codec
        .encode_with_clock(&oauth_state, state.clock.as_ref())
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "failed to seal oauth state cookie");
            return error_response(&ServiceError::Internal("failed to start sign-in".into()));
        }
    };

    let cookie = match cookie::set_cookie(
        OAUTH_STATE_COOKIE,
        &token,
        state.settings.oauth_state_cookie(),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "oauth state cookie is not a valid header value");
            return error_response(&ServiceError::Internal("failed to start sign-in".into()));
        }
    };

    let location = github::build_oauth_init_url(
        &state.settings.github_client_id,
        &state.settings.github_redirect_url,
        &oauth_state.state,
    );
    info!("redirecting to github authorization");

    ([(header::SET_COOKIE, cookie)], Redirect::to(&location)).into_response()
}

/// `GET /health` — liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> Response {
    error_response(&ServiceError::NotFound(
        "the requested resource does not exist".into(),
    ))
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// Decode the session cookie from `headers`.
fn load_session(state: &AppState, headers: &HeaderMap) -> Result<SessionData, ServiceError> {
    let token = cookie::read_cookie(headers, &state.settings.session_cookie_name)
        .ok_or_else(|| ServiceError::InvalidSession("missing session cookie".into()))?;

    state
        .codec
        .decode_with_clock(
            token,
            state.settings.session_max_age_secs,
            state.clock.as_ref(),
        )
        .map_err(session_error)
}

/// Map a codec failure onto the service error taxonomy.
///
/// A payload that authenticates but does not deserialize as [`SessionData`]
/// (e.g. an OAuth state cookie replayed as a session) is an invalid session.
fn session_error(e: SessionError) -> ServiceError {
    match e {
        SessionError::Expired { .. } => ServiceError::SessionExpired,
        SessionError::Configuration(msg) => ServiceError::Internal(msg),
        other => ServiceError::InvalidSession(other.kind().into()),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match err {
        // Never echo codec internals for untrusted cookies.
        ServiceError::InvalidSession(_) => "session is missing or invalid".to_owned(),
        ServiceError::Internal(_) => "internal error".to_owned(),
        other => other.to_string(),
    };
    (status, Json(ErrorResponse::new(err.code(), message))).into_response()
}
