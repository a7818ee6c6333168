//! Error taxonomy for token encoding and decoding.

use std::fmt;

use thiserror::Error;

use crate::nonce::NONCE_LEN;

/// Which textual segment of a token failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The first, URL-safe base64 segment.
    Nonce,
    /// The second, standard base64 segment.
    Ciphertext,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Nonce => f.write_str("nonce"),
            Segment::Ciphertext => f.write_str("ciphertext"),
        }
    }
}

/// Errors produced by the session codec.
///
/// Every variant except [`SessionError::Expired`] means the token cannot be
/// trusted at all. `Expired` is only returned after authentication succeeded:
/// the token is genuine but stale.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Key material has the wrong shape or the cipher could not be built.
    #[error("invalid key material: {0}")]
    Configuration(String),

    /// The token does not consist of exactly two `.`-separated segments.
    #[error("session token must have two segments, found {0}")]
    MalformedToken(usize),

    /// A token segment is not valid unpadded base64.
    #[error("failed to decode {segment}: {source}")]
    Decode {
        segment: Segment,
        #[source]
        source: base64::DecodeError,
    },

    /// The nonce segment decoded to the wrong number of bytes.
    #[error("nonce must be {NONCE_LEN} bytes, got {0}")]
    InvalidNonceLength(usize),

    /// AEAD tag verification failed.
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("token failed authentication")]
    Authentication,

    /// The decrypted message is too short to hold a timestamp.
    #[error("invalid timestamp: sealed message is {0} bytes")]
    MalformedTimestamp(usize),

    /// The token authenticated but is older than the allowed maximum age.
    #[error("token expired: age {age}s exceeds max age {max_age}s")]
    Expired { age: i64, max_age: i64 },

    /// The payload could not be serialized or deserialized.
    #[error("payload serialization failed: {0}")]
    Serialization(String),
}

impl SessionError {
    /// Returns `true` for a genuine token that is past its maximum age.
    pub fn is_expired(&self) -> bool {
        matches!(self, SessionError::Expired { .. })
    }

    /// Returns `true` when the input string itself is untrustworthy
    /// (malformed, undecodable, forged or corrupted).
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            SessionError::MalformedToken(_)
                | SessionError::Decode { .. }
                | SessionError::InvalidNonceLength(_)
                | SessionError::Authentication
                | SessionError::MalformedTimestamp(_)
        )
    }

    /// Short, stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Configuration(_) => "configuration",
            SessionError::MalformedToken(_) => "malformed_token",
            SessionError::Decode { .. } => "decode",
            SessionError::InvalidNonceLength(_) => "invalid_nonce_length",
            SessionError::Authentication => "authentication",
            SessionError::MalformedTimestamp(_) => "malformed_timestamp",
            SessionError::Expired { .. } => "expired",
            SessionError::Serialization(_) => "serialization",
        }
    }
}
