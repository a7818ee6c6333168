//! Configuration loading and validation for the web service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;
use session_codec::{KeyMaterial, NoncePolicy};
use url::Url;

/// Validated web service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base64-encoded 16-byte AES-128 key for session cookies. **Required.**
    pub session_encryption_key: String,

    /// Base64-encoded 32-byte HMAC-SHA-256 key for nonce derivation. **Required.**
    pub session_deterministic_key: String,

    /// Name of the session cookie.
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,

    /// Maximum accepted session age in seconds.
    #[serde(default = "default_session_max_age")]
    pub session_max_age_secs: i64,

    /// How new session tokens pick their nonce.
    #[serde(default)]
    pub session_nonce_policy: NoncePolicy,

    /// Whether cookies carry the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,

    /// Maximum accepted age of the OAuth state cookie in seconds.
    #[serde(default = "default_oauth_state_max_age")]
    pub oauth_state_max_age_secs: i64,

    /// GitHub OAuth app client ID. **Required.**
    pub github_client_id: String,

    /// Absolute callback URL registered with the GitHub OAuth app. **Required.**
    pub github_redirect_url: String,
}

fn default_listen_port() -> u16 {
    3000
}
fn default_log_level() -> String {
    "info".into()
}
fn default_session_cookie_name() -> String {
    "_session".into()
}
fn default_session_max_age() -> i64 {
    3600
}
fn default_oauth_state_max_age() -> i64 {
    600
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decode the session keys.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is not base64 or has the wrong length.
    pub fn session_keys(&self) -> Result<KeyMaterial> {
        KeyMaterial::from_base64(&self.session_encryption_key, &self.session_deterministic_key)
            .context("SESSION_ENCRYPTION_KEY / SESSION_DETERMINISTIC_KEY are invalid")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.session_encryption_key, "SESSION_ENCRYPTION_KEY")?;
        ensure_non_empty(&self.session_deterministic_key, "SESSION_DETERMINISTIC_KEY")?;
        ensure_non_empty(&self.session_cookie_name, "SESSION_COOKIE_NAME")?;
        ensure_non_empty(&self.github_client_id, "GITHUB_CLIENT_ID")?;
        ensure_non_empty(&self.github_redirect_url, "GITHUB_REDIRECT_URL")?;

        self.session_keys()?;
        Url::parse(&self.github_redirect_url)
            .context("GITHUB_REDIRECT_URL must be an absolute URL")?;

        if self
            .session_cookie_name
            .contains(|c: char| !c.is_ascii_graphic() || "()<>@,;:\\\"/[]?={}".contains(c))
        {
            anyhow::bail!("SESSION_COOKIE_NAME must be a valid cookie token");
        }
        if self.session_max_age_secs <= 0 {
            anyhow::bail!("SESSION_MAX_AGE_SECS must be > 0");
        }
        if self.oauth_state_max_age_secs <= 0 {
            anyhow::bail!("OAUTH_STATE_MAX_AGE_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
