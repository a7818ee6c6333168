//! The textual token: `<base64url-no-pad(nonce)>.<base64-no-pad(ciphertext+tag)>`.
//!
//! Note the two segments use different alphabets: the nonce is URL-safe, the
//! ciphertext uses the standard alphabet (`+` and `/`). Both are unpadded.

use std::fmt;
use std::str::FromStr;

use base64::{
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine as _,
};

use crate::error::{Segment, SessionError};
use crate::nonce::NONCE_LEN;

/// Separator between the nonce and ciphertext segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// A parsed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            URL_SAFE_NO_PAD.encode(self.nonce),
            SEGMENT_SEPARATOR,
            STANDARD_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for Token {
    type Err = SessionError;

    /// Parse the textual form. No cryptographic work happens here.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MalformedToken`] unless there are exactly two segments.
    /// - [`SessionError::Decode`] if either segment is not valid unpadded base64
    ///   in its alphabet.
    /// - [`SessionError::InvalidNonceLength`] if the nonce is not 12 bytes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(SEGMENT_SEPARATOR).collect();
        let [nonce_b64, ciphertext_b64] = segments[..] else {
            return Err(SessionError::MalformedToken(segments.len()));
        };

        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(nonce_b64)
            .map_err(|source| SessionError::Decode {
                segment: Segment::Nonce,
                source,
            })?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| SessionError::InvalidNonceLength(nonce_bytes.len()))?;

        let ciphertext = STANDARD_NO_PAD
            .decode(ciphertext_b64)
            .map_err(|source| SessionError::Decode {
                segment: Segment::Ciphertext,
                source,
            })?;

        Ok(Self { nonce, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Token {
        Token {
            nonce: [0xFB; NONCE_LEN],
            ciphertext: vec![0xFB, 0xEF, 0xFF, 0x00, 0x01],
        }
    }

    #[test]
    fn display_uses_two_alphabets() {
        // 0xFB 0xEF 0xFF encodes to "++//" in the standard alphabet and
        // "--__" in the URL-safe one.
        let t = Token {
            nonce: [0xFB, 0xEF, 0xFF, 0xFB, 0xEF, 0xFF, 0xFB, 0xEF, 0xFF, 0xFB, 0xEF, 0xFF],
            ciphertext: vec![0xFB, 0xEF, 0xFF],
        };
        assert_eq!(t.to_string(), "--__--__--__--__.++//");
    }

    #[test]
    fn parse_round_trip() {
        let t = sample();
        let parsed: Token = t.to_string().parse().unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn nonce_segment_is_sixteen_chars() {
        let s = sample().to_string();
        let (nonce, _) = s.split_once('.').unwrap();
        assert_eq!(nonce.len(), 16);
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        for s in ["", "abc", "a.b.c", "....", "AAAAAAAAAAAAAAAA.AAAA.AAAA"] {
            let err = s.parse::<Token>().unwrap_err();
            assert!(
                matches!(err, SessionError::MalformedToken(_)),
                "{s:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn segment_count_is_reported() {
        assert!(matches!(
            "a.b.c".parse::<Token>(),
            Err(SessionError::MalformedToken(3))
        ));
        assert!(matches!(
            "abc".parse::<Token>(),
            Err(SessionError::MalformedToken(1))
        ));
    }

    #[test]
    fn rejects_bad_nonce_base64() {
        let err = "!!!.AAAA".parse::<Token>().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Decode {
                segment: Segment::Nonce,
                ..
            }
        ));
    }

    #[test]
    fn rejects_standard_alphabet_in_nonce() {
        let err = "++++++++++++++++.AAAA".parse::<Token>().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Decode {
                segment: Segment::Nonce,
                ..
            }
        ));
    }

    #[test]
    fn rejects_padded_ciphertext() {
        let nonce = URL_SAFE_NO_PAD.encode([0u8; NONCE_LEN]);
        let err = format!("{nonce}.AA==").parse::<Token>().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Decode {
                segment: Segment::Ciphertext,
                ..
            }
        ));
    }

    #[test]
    fn rejects_short_nonce() {
        let nonce = URL_SAFE_NO_PAD.encode([0u8; 8]);
        let err = format!("{nonce}.AAAA").parse::<Token>().unwrap_err();
        assert!(matches!(err, SessionError::InvalidNonceLength(8)));
    }
}
