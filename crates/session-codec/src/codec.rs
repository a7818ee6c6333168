//! [`SessionCodec`]: payload ⇄ token.
//!
//! Encoding: serialize → derive nonce → frame timestamp → seal → render.
//! Decoding is the exact inverse plus the age check, which can fail even when
//! authentication succeeds.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::cipher;
use crate::clock::Clock;
use crate::error::SessionError;
use crate::expiry;
use crate::format::{Json, PayloadFormat};
use crate::keys::KeyMaterial;
use crate::nonce::{self, NoncePolicy, NONCE_LEN};
use crate::token::Token;

/// Encodes and decodes session tokens under one set of keys.
///
/// Stateless after construction: share it by reference (or `Arc`) across
/// threads and call it concurrently without locking.
#[derive(Debug)]
pub struct SessionCodec<F = Json> {
    keys: KeyMaterial,
    nonce_policy: NoncePolicy,
    format: PhantomData<fn() -> F>,
}

impl SessionCodec<Json> {
    /// Create a JSON-payload codec with the default nonce policy.
    pub fn new(keys: KeyMaterial) -> Self {
        Self::with_format(keys)
    }
}

impl<F: PayloadFormat> SessionCodec<F> {
    /// Create a codec for payload format `F` with the default nonce policy.
    pub fn with_format(keys: KeyMaterial) -> Self {
        Self {
            keys,
            nonce_policy: NoncePolicy::default(),
            format: PhantomData,
        }
    }

    /// Replace the nonce policy used by subsequent encodes.
    pub fn with_nonce_policy(mut self, policy: NoncePolicy) -> Self {
        self.nonce_policy = policy;
        self
    }

    pub fn nonce_policy(&self) -> NoncePolicy {
        self.nonce_policy
    }

    /// Serialize `payload` and seal it into a token string stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Serialization`] if the payload cannot be
    /// serialized, or [`SessionError::Configuration`] on a cipher failure.
    pub fn encode<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        now: i64,
    ) -> Result<String, SessionError> {
        let bytes = F::to_bytes(payload)?;
        Ok(self.seal_bytes(&bytes, now)?.to_string())
    }

    /// Parse, authenticate, age-check and deserialize a token string.
    ///
    /// # Errors
    ///
    /// Any [`SessionError`] variant except `Configuration` under normal key
    /// material; see [`SessionError::is_expired`] and
    /// [`SessionError::is_invalid_token`].
    ///
    /// Only the encryption key takes part in verification. The deterministic
    /// key is used when issuing, so codecs that share an encryption key accept
    /// each other's tokens even if their deterministic keys differ.
    pub fn decode<T: DeserializeOwned>(
        &self,
        token: &str,
        max_age_secs: i64,
        now: i64,
    ) -> Result<T, SessionError> {
        let result = token
            .parse::<Token>()
            .and_then(|token| self.open_bytes(&token, max_age_secs, now))
            .and_then(|bytes| F::from_bytes(&bytes));
        if let Err(e) = &result {
            debug!(kind = e.kind(), format = F::NAME, "session token rejected");
        }
        result
    }

    /// [`encode`](Self::encode) stamped with the time read from `clock`.
    pub fn encode_with_clock<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        clock: &dyn Clock,
    ) -> Result<String, SessionError> {
        self.encode(payload, clock.now_unix())
    }

    /// [`decode`](Self::decode) with the age measured against `clock`.
    pub fn decode_with_clock<T: DeserializeOwned>(
        &self,
        token: &str,
        max_age_secs: i64,
        clock: &dyn Clock,
    ) -> Result<T, SessionError> {
        self.decode(token, max_age_secs, clock.now_unix())
    }

    /// Seal already-serialized payload bytes.
    ///
    /// The nonce is derived from `value` alone, from the framed message, or
    /// drawn at random, according to the codec's [`NoncePolicy`].
    pub fn seal_bytes(&self, value: &[u8], now: i64) -> Result<Token, SessionError> {
        let message = expiry::frame(value, now);
        let nonce = self.nonce_for(value, &message)?;
        let ciphertext = cipher::seal(self.keys.encryption_key(), &nonce, &message)?;
        Ok(Token { nonce, ciphertext })
    }

    /// Authenticate a parsed token, check its age and return the payload bytes.
    pub fn open_bytes(
        &self,
        token: &Token,
        max_age_secs: i64,
        now: i64,
    ) -> Result<Vec<u8>, SessionError> {
        let message = cipher::open(self.keys.encryption_key(), &token.nonce, &token.ciphertext)?;
        let payload = expiry::unframe(&message, max_age_secs, now)?;
        Ok(payload.to_vec())
    }

    fn nonce_for(&self, value: &[u8], message: &[u8]) -> Result<[u8; NONCE_LEN], SessionError> {
        let key = self.keys.deterministic_key();
        match self.nonce_policy {
            NoncePolicy::Payload => nonce::derive_nonce(value, key),
            NoncePolicy::Framed => nonce::derive_nonce(message, key),
            NoncePolicy::Random => Ok(nonce::random_nonce()),
        }
    }
}
