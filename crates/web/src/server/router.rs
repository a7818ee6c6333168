//! Axum router construction.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/session", get(handlers::session))
        .route("/oauth/github/start", get(handlers::oauth_start))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use axum_test::TestServer;
    use common::protocol::{HealthResponse, OAuthState};
    use tower::ServiceExt;

    use crate::server::cookie;
    use crate::server::state::OAUTH_STATE_COOKIE;

    const NOW: i64 = 1_700_000_000;

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(AppState::for_tests(NOW));
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let server = TestServer::new(build(AppState::for_tests(NOW))).unwrap();
        let resp = server.get("/health").await;
        resp.assert_status_ok();
        let body: HealthResponse = resp.json();
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn index_renders_signed_out() {
        let server = TestServer::new(build(AppState::for_tests(NOW))).unwrap();
        let resp = server.get("/").await;
        resp.assert_status_ok();
        assert!(resp.text().contains("Sign in with GitHub"));
    }

    #[tokio::test]
    async fn oauth_start_redirects_with_sealed_state() {
        let state = AppState::for_tests(NOW);
        let app = build(state.clone());
        let req = Request::builder()
            .uri("/oauth/github/start")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let location = resp.headers()["location"].to_str().unwrap().to_owned();
        assert!(location
            .starts_with("https://github.com/login/oauth/authorize?client_id=Iv1.client&"));

        // The state in the redirect matches the one sealed into the cookie.
        let cookies = resp.headers().clone();
        let mut request_headers = axum::http::HeaderMap::new();
        let set_cookie = cookies["set-cookie"].to_str().unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Max-Age=600"));
        let pair = set_cookie.split(';').next().unwrap();
        request_headers.insert("cookie", pair.parse().unwrap());
        let token = cookie::read_cookie(&request_headers, OAUTH_STATE_COOKIE).unwrap();

        let sealed: OAuthState = state.codec.decode(token, 600, NOW).unwrap();
        assert_eq!(sealed.state.len(), 32);
        assert!(location.ends_with(&format!("&state={}", sealed.state)));
    }
}
