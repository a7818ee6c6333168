//! Nonce derivation.
//!
//! The nonce is the first 96 bits of `HMAC-SHA-256(deterministic_key, content)`.
//! Which bytes count as `content` is chosen by [`NoncePolicy`].

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::SessionError;
use crate::keys::DETERMINISTIC_KEY_LEN;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

type HmacSha256 = Hmac<Sha256>;

/// How the encoder picks the nonce for a new token.
///
/// Decoding never depends on the policy: the nonce travels inside the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoncePolicy {
    /// HMAC over the serialized payload only.
    ///
    /// Output is fully deterministic for a given payload, but re-encoding the
    /// same payload at a different time reuses the nonce for a different
    /// plaintext. Interoperates with tokens issued by older deployments.
    Payload,
    /// HMAC over the framed message (timestamp followed by payload).
    #[default]
    Framed,
    /// 96 bits from the OS CSPRNG.
    Random,
}

/// Derive a 12-byte nonce from `content` under `key`.
///
/// Same `(content, key)` always yields the same nonce.
///
/// # Errors
///
/// Returns [`SessionError::Configuration`] if the HMAC cannot be keyed
/// (unreachable for a 32-byte key).
pub fn derive_nonce(
    content: &[u8],
    key: &[u8; DETERMINISTIC_KEY_LEN],
) -> Result<[u8; NONCE_LEN], SessionError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SessionError::Configuration(format!("hmac key rejected: {e}")))?;
    mac.update(content);
    let digest = mac.finalize().into_bytes();

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&digest[..NONCE_LEN]);
    Ok(nonce)
}

/// Draw a nonce from the OS CSPRNG.
pub fn random_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_nonce() {
        let key = [0x11u8; DETERMINISTIC_KEY_LEN];
        let a = derive_nonce(b"payload", &key).unwrap();
        let b = derive_nonce(b"payload", &key).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_content_different_nonce() {
        let key = [0x11u8; DETERMINISTIC_KEY_LEN];
        let a = derive_nonce(b"payload-a", &key).unwrap();
        let b = derive_nonce(b"payload-b", &key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_key_different_nonce() {
        let a = derive_nonce(b"payload", &[0x11u8; DETERMINISTIC_KEY_LEN]).unwrap();
        let b = derive_nonce(b"payload", &[0x22u8; DETERMINISTIC_KEY_LEN]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn is_truncated_hmac_sha256() {
        // RFC 4231 test case 2, key padded by the HMAC construction itself.
        // A 32-byte key of "Jefe" + zeroes is equivalent to the 4-byte key.
        let mut key = [0u8; DETERMINISTIC_KEY_LEN];
        key[..4].copy_from_slice(b"Jefe");
        let nonce = derive_nonce(b"what do ya want for nothing?", &key).unwrap();
        assert_eq!(
            nonce,
            [0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26]
        );
    }

    #[test]
    fn random_nonces_differ() {
        assert_ne!(random_nonce(), random_nonce());
    }

    #[test]
    fn policy_defaults_to_framed() {
        assert_eq!(NoncePolicy::default(), NoncePolicy::Framed);
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let p: NoncePolicy = serde_json::from_str("\"payload\"").unwrap();
        assert_eq!(p, NoncePolicy::Payload);
        let p: NoncePolicy = serde_json::from_str("\"random\"").unwrap();
        assert_eq!(p, NoncePolicy::Random);
    }
}
