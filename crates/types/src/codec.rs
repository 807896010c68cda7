//! Binary encoding for call parameters and stored records.
//!
//! Records and parameters are SBOR-encoded. Counters and index assignments
//! are stored as bare little-endian `u32`s.

use sbor::{basic_decode, basic_encode};

pub use sbor::{BasicDecode, BasicEncode};
use thiserror::Error;

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("SBOR decode error: {0}")]
    SborDecode(String),

    #[error("SBOR encode error: {0}")]
    SborEncode(String),

    #[error("Invalid u32 encoding: expected 4 bytes, got {0}")]
    InvalidU32(usize),
}

/// SBOR-encode a value.
pub fn encode<T: BasicEncode + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    basic_encode(value).map_err(|e| CodecError::SborEncode(format!("{:?}", e)))
}

/// SBOR-decode a value.
pub fn decode<T: BasicDecode>(bytes: &[u8]) -> Result<T, CodecError> {
    basic_decode(bytes).map_err(|e| CodecError::SborDecode(format!("{:?}", e)))
}

/// Encode a `u32` as 4 little-endian bytes.
pub fn encode_u32(value: u32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Decode a `u32` from exactly 4 little-endian bytes.
pub fn decode_u32(bytes: &[u8]) -> Result<u32, CodecError> {
    let arr: [u8; 4] = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidU32(bytes.len()))?;
    Ok(u32::from_le_bytes(arr))
}
