//! `Cookie` / `Set-Cookie` header helpers.
//!
//! Token strings only contain base64 characters and `.`, all of which are
//! valid cookie octets, so values are written unquoted.

use axum::http::{
    header::{self, InvalidHeaderValue},
    HeaderMap, HeaderValue,
};

/// Attributes shared by every cookie the service sets.
#[derive(Debug, Clone, Copy)]
pub struct CookieAttrs {
    /// Lifetime in seconds (`Max-Age`).
    pub max_age_secs: i64,
    /// Whether to add the `Secure` attribute.
    pub secure: bool,
}

/// Build a `Set-Cookie` value: `HttpOnly`, `SameSite=Lax`, path `/`.
pub fn set_cookie(
    name: &str,
    value: &str,
    attrs: CookieAttrs,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        attrs.max_age_secs
    );
    if attrs.secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Find the value of cookie `name` in the request's `Cookie` headers.
///
/// The first matching pair wins. Headers that are not valid UTF-8 are skipped.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}
