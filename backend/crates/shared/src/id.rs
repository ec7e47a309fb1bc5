//! Common ID Types
//!
//! Type-safe 32-byte identifiers rendered as 64-character lowercase hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Byte length of every identifier
pub const ID_LEN: usize = 32;

/// Failure to parse an identifier from hex
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdParseError {
    #[error("expected {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type AuthorKey = Id<markers::PublicKey>;
/// let id = AuthorKey::from_bytes([0u8; 32]);
/// assert_eq!(id.to_hex().len(), 64);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    bytes: [u8; ID_LEN],
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap raw bytes
    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self {
            bytes,
            _marker: PhantomData,
        }
    }

    /// Parse from hex (either case)
    pub fn parse_hex(s: &str) -> Result<Self, IdParseError> {
        if s.len() != ID_LEN * 2 {
            return Err(IdParseError::Length {
                expected: ID_LEN * 2,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.bytes
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.to_hex())
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl<T> From<[u8; ID_LEN]> for Id<T> {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for public keys (record authors, recipients)
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct PublicKey;
}

/// Record author or award recipient
pub type PublicKey = Id<markers::PublicKey>;

#[cfg(test)]
mod tests {
    use super::*;

    const PK: &str = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";

    #[test]
    fn test_from_bytes() {
        let pubkey = PublicKey::from([1u8; 32]);
        assert_eq!(pubkey.as_bytes(), &[1u8; 32]);
        assert_eq!(pubkey.to_hex(), "01".repeat(32));
    }

    #[test]
    fn test_parse_hex_roundtrip() {
        let id: PublicKey = PK.parse().unwrap();
        assert_eq!(id.to_hex(), PK);
        assert_eq!(id.to_string(), PK);
    }

    #[test]
    fn test_parse_hex_uppercase_normalizes() {
        let id = PublicKey::parse_hex(&PK.to_uppercase()).unwrap();
        assert_eq!(id.to_hex(), PK);
    }

    #[test]
    fn test_parse_hex_rejects_bad_length() {
        let err = PublicKey::parse_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            IdParseError::Length {
                expected: 64,
                actual: 4
            }
        );
    }

    #[test]
    fn test_parse_hex_rejects_non_hex() {
        let bad = "z".repeat(64);
        let err = PublicKey::parse_hex(&bad).unwrap_err();
        assert_eq!(
            err.clone(),
            IdParseError::Hex(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 })
        );
        assert!(err.to_string().starts_with("invalid hex"));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = PublicKey::parse_hex(PK).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", PK));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
