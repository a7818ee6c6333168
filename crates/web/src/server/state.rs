//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use anyhow::Result;
use session_codec::{Clock, SessionCodec, SystemClock};

use crate::config::Config;
use super::cookie::CookieAttrs;

/// Name of the short-lived cookie carrying the OAuth `state` parameter.
pub const OAUTH_STATE_COOKIE: &str = "_oauth_state";

/// Cookie and OAuth settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub session_cookie_name: String,
    pub session_max_age_secs: i64,
    pub oauth_state_max_age_secs: i64,
    pub cookie_secure: bool,
    pub github_client_id: String,
    pub github_redirect_url: String,
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            session_cookie_name: cfg.session_cookie_name.clone(),
            session_max_age_secs: cfg.session_max_age_secs,
            oauth_state_max_age_secs: cfg.oauth_state_max_age_secs,
            cookie_secure: cfg.cookie_secure,
            github_client_id: cfg.github_client_id.clone(),
            github_redirect_url: cfg.github_redirect_url.clone(),
        }
    }

    pub fn oauth_state_cookie(&self) -> CookieAttrs {
        CookieAttrs {
            max_age_secs: self.oauth_state_max_age_secs,
            secure: self.cookie_secure,
        }
    }
}

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying key material or settings.
#[derive(Clone)]
pub struct AppState {
    /// Session cookie codec; owns the only copy of the key material.
    pub codec: Arc<SessionCodec>,
    /// Time source for issuing and age-checking cookies.
    pub clock: Arc<dyn Clock>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new [`AppState`] from its parts.
    pub fn new(codec: SessionCodec, clock: Arc<dyn Clock>, settings: Settings) -> Self {
        Self {
            codec: Arc::new(codec),
            clock,
            settings: Arc::new(settings),
        }
    }

    /// Build the state from validated configuration, using the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the session keys cannot be decoded.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let codec = SessionCodec::new(cfg.session_keys()?)
            .with_nonce_policy(cfg.session_nonce_policy);
        Ok(Self::new(codec, Arc::new(SystemClock), Settings::from_config(cfg)))
    }
}

#[cfg(test)]
impl AppState {
    /// State built from the test configuration with the clock frozen at `now`.
    pub(crate) fn for_tests(now: i64) -> Self {
        let cfg = crate::config::tests::valid_config();
        let codec = SessionCodec::new(cfg.session_keys().unwrap())
            .with_nonce_policy(cfg.session_nonce_policy);
        Self::new(
            codec,
            Arc::new(session_codec::FixedClock(now)),
            Settings::from_config(&cfg),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_copy_cookie_attributes() {
        let cfg = crate::config::tests::valid_config();
        let settings = Settings::from_config(&cfg);
        assert_eq!(settings.session_max_age_secs, 3600);
        assert_eq!(settings.oauth_state_cookie().max_age_secs, 600);
        assert!(!settings.oauth_state_cookie().secure);
    }

    #[test]
    fn oauth_state_cookie_follows_secure_flag() {
        let cfg = crate::config::Config {
            cookie_secure: true,
            oauth_state_max_age_secs: 120,
            ..crate::config::tests::valid_config()
        };
        let attrs = Settings::from_config(&cfg).oauth_state_cookie();
        assert!(attrs.secure);
        assert_eq!(attrs.max_age_secs, 120);
    }

    #[test]
    fn from_config_builds_codec() {
        let cfg = crate::config::tests::valid_config();
        let state = AppState::from_config(&cfg).unwrap();
        let token = state.codec.encode("x", 0).unwrap();
        assert_eq!(state.codec.decode::<String>(&token, 1, 0).unwrap(), "x");
    }
}
