//! Stateless session-cookie tokens.
//!
//! A [`SessionCodec`] turns any serializable payload into an opaque,
//! tamper-evident, time-bounded string suitable for a client-held cookie, and
//! turns such strings back into payloads while rejecting forged, corrupted or
//! expired tokens.
//!
//! # Token format
//!
//! ```text
//! <base64url-no-pad(nonce)>.<base64-no-pad(ciphertext+tag)>
//! ```
//!
//! The AES-128-GCM plaintext is `i64_le(unix_seconds) ++ serialize(payload)`.
//! The 12-byte nonce is an HMAC-SHA-256 of content bytes under a second,
//! independent key, truncated to 96 bits (see [`NoncePolicy`]).
//!
//! # Example
//!
//! ```
//! use session_codec::{KeyMaterial, SessionCodec};
//!
//! let codec = SessionCodec::new(KeyMaterial::new([7u8; 16], [9u8; 32]));
//! let token = codec.encode("Ich verstehe nur Bahnhof!", 1_700_000_000).unwrap();
//! let back: String = codec.decode(&token, 3600, 1_700_000_010).unwrap();
//! assert_eq!(back, "Ich verstehe nur Bahnhof!");
//! ```

pub mod cipher;
pub mod clock;
pub mod codec;
pub mod error;
pub mod expiry;
pub mod format;
pub mod keys;
pub mod nonce;
pub mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::SessionCodec;
pub use error::{Segment, SessionError};
pub use format::{Bincode, Json, PayloadFormat};
pub use keys::{KeyMaterial, DETERMINISTIC_KEY_LEN, ENCRYPTION_KEY_LEN};
pub use nonce::{NoncePolicy, NONCE_LEN};
pub use token::Token;
