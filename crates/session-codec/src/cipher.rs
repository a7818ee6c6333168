//! AES-128-GCM seal/open of a complete message.
//!
//! No associated data is bound. The 16-byte authentication tag is appended to
//! the ciphertext by [`seal`] and verified by [`open`] before any plaintext is
//! released.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Nonce,
};

use crate::error::SessionError;
use crate::keys::ENCRYPTION_KEY_LEN;
use crate::nonce::NONCE_LEN;

/// Byte length of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt and authenticate `plaintext`.
///
/// # Errors
///
/// Returns [`SessionError::Configuration`] if the cipher cannot be built, which
/// cannot happen for a well-formed 16-byte key.
pub fn seal(
    key: &[u8; ENCRYPTION_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, SessionError> {
    let cipher = build_cipher(key)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| SessionError::Configuration("aead seal failed".into()))
}

/// Verify and decrypt `ciphertext` (tag included).
///
/// # Errors
///
/// Returns [`SessionError::Authentication`] if the tag does not verify for any
/// reason: tampering, wrong key, wrong nonce, or a truncated ciphertext.
pub fn open(
    key: &[u8; ENCRYPTION_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, SessionError> {
    let cipher = build_cipher(key)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SessionError::Authentication)
}

fn build_cipher(key: &[u8; ENCRYPTION_KEY_LEN]) -> Result<Aes128Gcm, SessionError> {
    Aes128Gcm::new_from_slice(key)
        .map_err(|_| SessionError::Configuration("invalid AES-128 key length".into()))
}
