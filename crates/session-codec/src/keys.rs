//! [`KeyMaterial`]: the two fixed-length secrets owned by a codec instance.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroize;

use crate::error::SessionError;

/// Byte length of the AES-128 content-encryption key.
pub const ENCRYPTION_KEY_LEN: usize = 16;

/// Byte length of the HMAC-SHA-256 nonce-derivation key.
pub const DETERMINISTIC_KEY_LEN: usize = 32;

/// Encryption and nonce-derivation keys.
///
/// Immutable once built. Key bytes are never printed (the `Debug` impl is
/// redacted) and are overwritten with zeroes when the value is dropped. The
/// type is intentionally not `Clone`: a codec owns exactly one copy.
pub struct KeyMaterial {
    encryption_key: [u8; ENCRYPTION_KEY_LEN],
    deterministic_key: [u8; DETERMINISTIC_KEY_LEN],
}

impl KeyMaterial {
    pub fn new(
        encryption_key: [u8; ENCRYPTION_KEY_LEN],
        deterministic_key: [u8; DETERMINISTIC_KEY_LEN],
    ) -> Self {
        Self {
            encryption_key,
            deterministic_key,
        }
    }

    /// Build key material from byte slices of exactly the right lengths.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Configuration`] if either slice has the wrong length.
    pub fn from_slices(
        encryption_key: &[u8],
        deterministic_key: &[u8],
    ) -> Result<Self, SessionError> {
        let encryption_key: [u8; ENCRYPTION_KEY_LEN] = encryption_key.try_into().map_err(|_| {
            SessionError::Configuration(format!(
                "encryption key must be {ENCRYPTION_KEY_LEN} bytes, got {}",
                encryption_key.len()
            ))
        })?;
        let deterministic_key: [u8; DETERMINISTIC_KEY_LEN] =
            deterministic_key.try_into().map_err(|_| {
                SessionError::Configuration(format!(
                    "deterministic key must be {DETERMINISTIC_KEY_LEN} bytes, got {}",
                    deterministic_key.len()
                ))
            })?;
        Ok(Self::new(encryption_key, deterministic_key))
    }

    /// Build key material from two standard (padded) base64 strings.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Configuration`] if either string is not valid
    /// base64 or decodes to the wrong length.
    pub fn from_base64(
        encryption_key: &str,
        deterministic_key: &str,
    ) -> Result<Self, SessionError> {
        let mut enc = STANDARD.decode(encryption_key.trim()).map_err(|e| {
            SessionError::Configuration(format!("encryption key is not base64: {e}"))
        })?;
        let mut det = STANDARD.decode(deterministic_key.trim()).map_err(|e| {
            SessionError::Configuration(format!("deterministic key is not base64: {e}"))
        })?;
        let keys = Self::from_slices(&enc, &det);
        enc.zeroize();
        det.zeroize();
        keys
    }

    pub(crate) fn encryption_key(&self) -> &[u8; ENCRYPTION_KEY_LEN] {
        &self.encryption_key
    }

    pub(crate) fn deterministic_key(&self) -> &[u8; DETERMINISTIC_KEY_LEN] {
        &self.deterministic_key
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.encryption_key.zeroize();
        self.deterministic_key.zeroize();
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("KeyMaterial([REDACTED])")
    }
}
