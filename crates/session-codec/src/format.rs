//! Pluggable payload serialization.
//!
//! The codec never interprets payload bytes; a [`PayloadFormat`] turns a
//! `serde` value into bytes before sealing and back after opening. The format
//! must be deterministic and lossless for the payload types in use, and both
//! sides of a deployment must agree on it.
//!
//! | Format | `NAME` | Wire format |
//! |---|---|---|
//! | [`Json`] | `json` | UTF-8 JSON text (`serde_json`) |
//! | [`Bincode`] | `bincode1` | bincode 1.x default options: little-endian, fixed-width integers, `u64` length prefixes |

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SessionError;

/// A self-describing or schema-driven serializer for token payloads.
pub trait PayloadFormat {
    /// Stable identifier used in logs.
    const NAME: &'static str;

    fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SessionError>;

    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SessionError>;
}

/// JSON payloads via `serde_json`. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl PayloadFormat for Json {
    const NAME: &'static str = "json";

    fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SessionError> {
        serde_json::to_vec(value).map_err(|e| SessionError::Serialization(e.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SessionError> {
        serde_json::from_slice(bytes).map_err(|e| SessionError::Serialization(e.to_string()))
    }
}

/// Compact binary payloads via `bincode` 1.x.
///
/// Not self-describing: the decoder must use exactly the type the encoder used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bincode;

impl PayloadFormat for Bincode {
    const NAME: &'static str = "bincode1";

    fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SessionError> {
        bincode::serialize(value).map_err(|e| SessionError::Serialization(e.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SessionError> {
        bincode::deserialize(bytes).map_err(|e| SessionError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Login {
        user: String,
        admin: bool,
    }

    #[test]
    fn json_is_plain_json() {
        let bytes = Json::to_bytes(&Login {
            user: "alice".into(),
            admin: false,
        })
        .unwrap();
        assert_eq!(bytes, br#"{"user":"alice","admin":false}"#);
    }

    #[test]
    fn json_shape_mismatch_is_serialization_error() {
        let err = Json::from_bytes::<Login>(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, SessionError::Serialization(_)));
    }

    #[test]
    fn bincode_string_layout() {
        // u64 little-endian length prefix, then the UTF-8 bytes.
        let bytes = Bincode::to_bytes("hi").unwrap();
        assert_eq!(bytes, [2, 0, 0, 0, 0, 0, 0, 0, b'h', b'i']);
    }

    #[test]
    fn bincode_truncated_input_fails() {
        let bytes = Bincode::to_bytes(&Login {
            user: "bob".into(),
            admin: true,
        })
        .unwrap();
        assert!(Bincode::from_bytes::<Login>(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn names_are_distinct() {
        assert_ne!(Json::NAME, Bincode::NAME);
    }
}
