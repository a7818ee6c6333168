//! GitHub OAuth authorization URL.

use url::form_urlencoded;

/// GitHub's OAuth authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// Scope requested from GitHub.
pub const SCOPE: &str = "user";

/// Build the URL the browser is redirected to when starting the OAuth flow.
///
/// Query parameters are form-urlencoded and sorted by key.
pub fn build_oauth_init_url(client_id: &str, redirect_url: &str, state: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_url)
        .append_pair("scope", SCOPE)
        .append_pair("state", state)
        .finish();
    format!("{AUTHORIZE_URL}?{query}")
}
