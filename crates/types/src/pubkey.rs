//! Peer public keys.
//!
//! Peers are identified by the hex encoding of their serialized public key.
//! The hex string is the primary key of every governance record; its decoded
//! bytes form the suffix of per-peer storage keys.
//!
//! Accepted serializations:
//!
//! ```text
//! 02|03 || x[32]                      compressed P-256 point (33 bytes)
//! 04 || x[32] || y[32]                uncompressed P-256 point (65 bytes)
//! 0x12 || 0x02 || sec1 point          typed ECDSA key on P-256
//! 0x14 || 0x19 || point[32]           typed Ed25519 key
//! ```

use sbor::prelude::*;
use std::fmt;

/// Key type tag for typed ECDSA keys.
pub const KEY_TYPE_ECDSA: u8 = 0x12;

/// Key type tag for typed EdDSA keys.
pub const KEY_TYPE_EDDSA: u8 = 0x14;

/// Curve label for NIST P-256.
pub const CURVE_P256: u8 = 0x02;

/// Curve label for Ed25519.
pub const CURVE_ED25519: u8 = 0x19;

/// A hex-encoded peer public key.
///
/// Construction via [`PeerPubkey::new`] does not validate; use
/// [`PeerPubkey::parse`] or [`PeerPubkey::validate`] on untrusted input.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, BasicSbor)]
#[sbor(transparent)]
pub struct PeerPubkey(String);

impl PeerPubkey {
    /// Wrap a hex string without validating it.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Parse and validate a hex-encoded public key.
    pub fn parse(hex: &str) -> Result<Self, PubkeyError> {
        let key = Self::new(hex);
        key.validate()?;
        Ok(key)
    }

    /// Encode raw key bytes as a peer key (lowercase hex).
    pub fn from_key_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// The hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the hex text into raw key bytes.
    ///
    /// Only checks that the text is lowercase hex; see
    /// [`PeerPubkey::validate`] for the full format check. Uppercase digits
    /// are rejected so that text and bytes map one to one.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PubkeyError> {
        if self.0.is_empty() {
            return Err(PubkeyError::Empty);
        }
        if self.0.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(PubkeyError::NonCanonicalHex);
        }
        hex::decode(&self.0).map_err(|_| PubkeyError::InvalidHex)
    }

    /// Validate the key format and return the decoded bytes.
    pub fn validate(&self) -> Result<Vec<u8>, PubkeyError> {
        let bytes = self.to_bytes()?;

        match bytes[0] {
            0x02..=0x04 => validate_p256(&bytes)?,
            KEY_TYPE_ECDSA => {
                let curve = *bytes.get(1).ok_or(PubkeyError::Truncated)?;
                if curve != CURVE_P256 {
                    return Err(PubkeyError::UnsupportedCurve(curve));
                }
                validate_p256(&bytes[2..])?;
            }
            KEY_TYPE_EDDSA => {
                let curve = *bytes.get(1).ok_or(PubkeyError::Truncated)?;
                if curve != CURVE_ED25519 {
                    return Err(PubkeyError::UnsupportedCurve(curve));
                }
                validate_ed25519(&bytes[2..])?;
            }
            other => return Err(PubkeyError::UnknownKeyType(other)),
        }

        Ok(bytes)
    }
}

fn validate_p256(point: &[u8]) -> Result<(), PubkeyError> {
    p256::PublicKey::from_sec1_bytes(point)
        .map(|_| ())
        .map_err(|_| PubkeyError::InvalidPoint)
}

fn validate_ed25519(point: &[u8]) -> Result<(), PubkeyError> {
    let arr: [u8; 32] = point.try_into().map_err(|_| PubkeyError::InvalidLength {
        expected: 32,
        actual: point.len(),
    })?;
    ed25519_dalek::VerifyingKey::from_bytes(&arr)
        .map(|_| ())
        .map_err(|_| PubkeyError::InvalidPoint)
}

impl fmt::Debug for PeerPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Untrusted text: truncate on char boundaries.
        let len = self.0.chars().count();
        if len > 16 {
            let head: String = self.0.chars().take(8).collect();
            let tail: String = self.0.chars().skip(len - 8).collect();
            write!(f, "PeerPubkey({}..{})", head, tail)
        } else {
            write!(f, "PeerPubkey({})", self.0)
        }
    }
}

impl fmt::Display for PeerPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerPubkey {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}

/// Errors from peer key validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PubkeyError {
    /// Empty key string.
    #[error("Empty public key")]
    Empty,

    /// Not a hex string.
    #[error("Public key is not valid hex")]
    InvalidHex,

    /// Hex with uppercase digits.
    #[error("Public key hex must be lowercase")]
    NonCanonicalHex,

    /// Typed key without a curve label.
    #[error("Public key is truncated")]
    Truncated,

    /// Wrong key material length.
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Unknown leading type byte.
    #[error("Unknown key type: {0:#04x}")]
    UnknownKeyType(u8),

    /// Known key type on an unsupported curve.
    #[error("Unsupported curve label: {0:#04x}")]
    UnsupportedCurve(u8),

    /// Bytes do not decode to a curve point.
    #[error("Public key is not a valid curve point")]
    InvalidPoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::elliptic_curve::sec1::ToEncodedPoint;

    fn p256_compressed(seed: u8) -> Vec<u8> {
        let secret = p256::SecretKey::from_slice(&[seed; 32]).unwrap();
        secret
            .public_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    #[test]
    fn test_compressed_p256_accepted() {
        let bytes = p256_compressed(3);
        let key = PeerPubkey::from_key_bytes(&bytes);
        assert_eq!(key.validate().unwrap(), bytes);
        assert!(PeerPubkey::parse(key.as_str()).is_ok());
    }

    #[test]
    fn test_typed_p256_accepted() {
        let mut bytes = vec![KEY_TYPE_ECDSA, CURVE_P256];
        bytes.extend(p256_compressed(5));
        assert!(PeerPubkey::from_key_bytes(&bytes).validate().is_ok());
    }

    #[test]
    fn test_typed_p256_wrong_curve_rejected() {
        let mut bytes = vec![KEY_TYPE_ECDSA, 0x03];
        bytes.extend(p256_compressed(5));
        assert_eq!(
            PeerPubkey::from_key_bytes(&bytes).validate(),
            Err(PubkeyError::UnsupportedCurve(0x03))
        );
    }

    #[test]
    fn test_ed25519_accepted() {
        let signing = ed25519_dalek::SigningKey::from_bytes(&[11u8; 32]);
        let mut bytes = vec![KEY_TYPE_EDDSA, CURVE_ED25519];
        bytes.extend_from_slice(signing.verifying_key().as_bytes());
        assert!(PeerPubkey::from_key_bytes(&bytes).validate().is_ok());
    }

    #[test]
    fn test_malformed_keys_rejected() {
        assert_eq!(PeerPubkey::new("").validate(), Err(PubkeyError::Empty));
        assert_eq!(
            PeerPubkey::new("zz").validate(),
            Err(PubkeyError::InvalidHex)
        );
        assert_eq!(
            PeerPubkey::new("02AB").validate(),
            Err(PubkeyError::NonCanonicalHex)
        );
        assert_eq!(
            PeerPubkey::new("12").validate(),
            Err(PubkeyError::Truncated)
        );
        assert_eq!(
            PeerPubkey::new("02ab").validate(),
            Err(PubkeyError::InvalidPoint)
        );
        assert_eq!(
            PeerPubkey::new("ff00").validate(),
            Err(PubkeyError::UnknownKeyType(0xff))
        );

        // SM2 and non-P-256 ECDSA keys are not accepted.
        assert_eq!(
            PeerPubkey::new("1302ab").validate(),
            Err(PubkeyError::UnknownKeyType(0x13))
        );

        // Right shape, but x is not on the curve.
        let mut off_curve = vec![0x02];
        off_curve.extend([0xffu8; 32]);
        assert_eq!(
            PeerPubkey::from_key_bytes(&off_curve).validate(),
            Err(PubkeyError::InvalidPoint)
        );
    }

    #[test]
    fn test_debug_truncates_non_ascii_key() {
        let key = PeerPubkey::new(format!("a{}", "é".repeat(19)));
        assert!(key.as_str().len() > 16);

        let shown = format!("{:?}", key);
        assert_eq!(shown, "PeerPubkey(aééééééé..éééééééé)");
        assert!(key.validate().is_err());

        let long = PeerPubkey::new("0123456789abcdef0123");
        assert_eq!(format!("{:?}", long), "PeerPubkey(01234567..cdef0123)");
    }
}
