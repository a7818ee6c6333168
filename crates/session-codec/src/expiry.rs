//! Timestamp framing inside the sealed message.
//!
//! ```text
//! sealed := i64_le(unix_seconds) ++ payload
//! ```

use crate::error::SessionError;

/// Byte length of the timestamp prefix.
pub const TIMESTAMP_LEN: usize = 8;

/// Prefix `payload` with `now` as a little-endian signed 64-bit integer.
pub fn frame(payload: &[u8], now: i64) -> Vec<u8> {
    let mut sealed = Vec::with_capacity(TIMESTAMP_LEN + payload.len());
    sealed.extend_from_slice(&now.to_le_bytes());
    sealed.extend_from_slice(payload);
    sealed
}

/// Read the timestamp prefix without checking age.
///
/// # Errors
///
/// Returns [`SessionError::MalformedTimestamp`] if fewer than
/// [`TIMESTAMP_LEN`] bytes are present.
pub fn read_timestamp(sealed: &[u8]) -> Result<i64, SessionError> {
    let prefix: [u8; TIMESTAMP_LEN] = sealed
        .get(..TIMESTAMP_LEN)
        .and_then(|p| p.try_into().ok())
        .ok_or(SessionError::MalformedTimestamp(sealed.len()))?;
    Ok(i64::from_le_bytes(prefix))
}

/// Strip the timestamp prefix and enforce the maximum age.
///
/// A timestamp in the future yields a negative age and is accepted.
///
/// # Errors
///
/// Returns [`SessionError::MalformedTimestamp`] if the prefix is missing and
/// [`SessionError::Expired`] if `now - timestamp > max_age_secs`.
pub fn unframe(sealed: &[u8], max_age_secs: i64, now: i64) -> Result<&[u8], SessionError> {
    let issued_at = read_timestamp(sealed)?;
    let age = now.saturating_sub(issued_at);
    if age > max_age_secs {
        return Err(SessionError::Expired {
            age,
            max_age: max_age_secs,
        });
    }
    Ok(&sealed[TIMESTAMP_LEN..])
}
