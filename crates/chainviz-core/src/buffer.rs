//! # Hash Buffers — Byte Sequences for Proof Replay
//!
//! `HashBuffer` is the value type every replay step operates on: an ordered
//! byte sequence with hex/UTF-8 conversion, concatenation, and endianness
//! reversal, loosely modeled on NodeJS buffers the way chainpoint tooling
//! uses them.
//!
//! ## Interoperability Invariant
//!
//! The hex-or-UTF-8 classification in [`HashBuffer::from_op_value`] mirrors
//! how receipt authors encode op values: a string composed entirely of hex
//! digits decodes as hex even when it is also plausible text. This ambiguity
//! is a wire contract shared with other chainpoint parsers and must not be
//! tightened.

use serde::{Deserialize, Serialize};

use crate::error::ProofError;

/// An immutable ordered byte sequence.
///
/// Every operation returns a new buffer; nothing mutates in place. A buffer
/// produced by a hash step is exactly the digest length of the algorithm
/// (32 bytes for SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashBuffer(Vec<u8>);

impl HashBuffer {
    /// Wrap raw bytes in a buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a hex-digit string, two characters per byte.
    ///
    /// # Errors
    ///
    /// `ProofError::InvalidEncoding` if `s` has odd length or contains a
    /// non-hex character.
    pub fn from_hex(s: &str) -> Result<Self, ProofError> {
        if s.len() % 2 != 0 {
            return Err(ProofError::InvalidEncoding {
                value: s.to_string(),
                reason: "odd number of hex digits".to_string(),
            });
        }
        let mut out = Vec::with_capacity(s.len() / 2);
        for chunk in s.as_bytes().chunks(2) {
            let pair = std::str::from_utf8(chunk).map_err(|_| ProofError::InvalidEncoding {
                value: s.to_string(),
                reason: "non-ASCII character in hex string".to_string(),
            })?;
            let byte = u8::from_str_radix(pair, 16).map_err(|_| ProofError::InvalidEncoding {
                value: s.to_string(),
                reason: format!("invalid hex pair {pair:?}"),
            })?;
            out.push(byte);
        }
        Ok(Self(out))
    }

    /// Encode `s` as its UTF-8 bytes. Infallible for `&str` input.
    pub fn from_utf8(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }

    /// Decode a free-form op value: hex wins when the string is composed
    /// entirely of hex digits, otherwise the UTF-8 bytes are taken as-is.
    ///
    /// # Errors
    ///
    /// `ProofError::InvalidEncoding` if the value classifies as hex but has
    /// an odd number of digits.
    pub fn from_op_value(s: &str) -> Result<Self, ProofError> {
        if Self::is_hex_string(s) {
            Self::from_hex(s)
        } else {
            Ok(Self::from_utf8(s))
        }
    }

    /// True iff `s` is non-empty and every character is a hex digit.
    pub fn is_hex_string(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// This buffer's bytes followed by `rhs`'s bytes. Order-significant:
    /// concatenation is not commutative.
    pub fn concat(&self, rhs: &HashBuffer) -> HashBuffer {
        let mut out = Vec::with_capacity(self.0.len() + rhs.0.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&rhs.0);
        Self(out)
    }

    /// Render each byte as exactly two lowercase zero-padded hex digits,
    /// concatenated in sequence order. This is how a buffer becomes a
    /// displayable, comparable hash string.
    pub fn to_hex_digest(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Reverse byte order (not nibble order). Bitcoin conventionally
    /// displays hashes byte-reversed relative to chainpoint's internal
    /// order; this is the switch between the two.
    pub fn reverse_bytes(&self) -> HashBuffer {
        Self(self.0.iter().rev().copied().collect())
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for HashBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for HashBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_digest())
    }
}
