//! Account addresses.
//!
//! An [`Address`] is the 20-byte account identifier that owns a peer key or
//! acts as the governance operator. Call parameters carry raw address bytes;
//! genesis files carry the base58 text form:
//!
//! ```text
//! base58( 0x17 || address[20] || sha256(sha256(0x17 || address))[..4] )
//! ```

use crate::PeerPubkey;
use sbor::prelude::*;
use sha2::{Digest, Sha256};
use std::fmt;

/// Version byte prefixed to the base58 form of an address.
pub const ADDRESS_VERSION: u8 = 0x17;

/// Domain tag for deriving an operator address from a bookkeeper set.
const DOMAIN_BOOKKEEPERS: &[u8] = b"peergov:bookkeepers:v1";

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, BasicSbor)]
#[sbor(transparent)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Size of an address in bytes.
    pub const BYTES: usize = 20;

    /// The all-zero address.
    pub const ZERO: Self = Address([0u8; 20]);

    /// Parse an address from raw bytes. The slice must be exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength {
                expected: Self::BYTES,
                actual: bytes.len(),
            })?;
        Ok(Address(arr))
    }

    /// Parse the base58 text form (version byte plus checksum).
    pub fn from_base58(text: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(text)
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;
        if decoded.len() != Self::BYTES + 5 {
            return Err(AddressError::InvalidLength {
                expected: Self::BYTES + 5,
                actual: decoded.len(),
            });
        }
        if decoded[0] != ADDRESS_VERSION {
            return Err(AddressError::InvalidVersion(decoded[0]));
        }

        let (body, checksum) = decoded.split_at(Self::BYTES + 1);
        if checksum != &double_sha256(body)[..4] {
            return Err(AddressError::ChecksumMismatch);
        }

        Self::from_slice(&body[1..])
    }

    /// Encode to the base58 text form.
    pub fn to_base58(&self) -> String {
        let mut buf = Vec::with_capacity(Self::BYTES + 5);
        buf.push(ADDRESS_VERSION);
        buf.extend_from_slice(&self.0);
        let checksum = double_sha256(&buf);
        buf.extend_from_slice(&checksum[..4]);
        bs58::encode(buf).into_string()
    }

    /// Derive the operator address controlled by a set of bookkeepers.
    ///
    /// The result does not depend on the order of `bookkeepers`.
    /// Returns `None` for an empty set.
    pub fn from_bookkeepers(bookkeepers: &[PeerPubkey]) -> Option<Self> {
        if bookkeepers.is_empty() {
            return None;
        }

        let mut keys: Vec<&PeerPubkey> = bookkeepers.iter().collect();
        keys.sort();
        keys.dedup();

        let mut hasher = blake3::Hasher::new();
        hasher.update(DOMAIN_BOOKKEEPERS);
        hasher.update(&(keys.len() as u32).to_le_bytes());
        for key in keys {
            hasher.update(key.as_str().as_bytes());
        }

        let digest = hasher.finalize();
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&digest.as_bytes()[..20]);
        Some(Address(arr))
    }

    /// Get the bytes as a slice.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

/// Errors that can occur when parsing an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Wrong number of bytes.
    #[error("Invalid address length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Not valid base58 text.
    #[error("Invalid base58 address: {0}")]
    InvalidBase58(String),

    /// Unknown version byte.
    #[error("Invalid address version byte: {0:#04x}")]
    InvalidVersion(u8),

    /// Checksum does not match the payload.
    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_roundtrip() {
        let address = Address([7u8; 20]);
        let text = address.to_base58();
        assert!(text.starts_with('A'));
        assert_eq!(Address::from_base58(&text).unwrap(), address);
    }

    #[test]
    fn test_base58_rejects_corrupt_checksum() {
        let mut text = Address([9u8; 20]).to_base58().into_bytes();
        let last = text.len() - 1;
        text[last] = if text[last] == b'1' { b'2' } else { b'1' };
        let text = String::from_utf8(text).unwrap();

        assert!(Address::from_base58(&text).is_err());
    }

    #[test]
    fn test_from_slice_length() {
        assert!(Address::from_slice(&[1u8; 20]).is_ok());
        assert_eq!(
            Address::from_slice(&[1u8; 19]),
            Err(AddressError::InvalidLength {
                expected: 20,
                actual: 19
            })
        );
    }

    #[test]
    fn test_bookkeeper_address_order_independent() {
        let a = PeerPubkey::new("02aa");
        let b = PeerPubkey::new("03bb");

        let ab = Address::from_bookkeepers(&[a.clone(), b.clone()]).unwrap();
        let ba = Address::from_bookkeepers(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(ab, ba);

        let only_a = Address::from_bookkeepers(&[a]).unwrap();
        assert_ne!(ab, only_a);
        assert!(Address::from_bookkeepers(&[]).is_none());
    }
}
