//! Typed reads and writes of stored records.

use crate::GovernanceError;
use peergov_core::StateStore;
use peergov_types::codec::{self, BasicDecode, BasicEncode};

/// Load and decode a record, if present.
pub(crate) fn load<T, S>(store: &S, key: &[u8]) -> Result<Option<T>, GovernanceError>
where
    T: BasicDecode,
    S: StateStore + ?Sized,
{
    match store.get(key)? {
        Some(bytes) => codec::decode(&bytes)
            .map(Some)
            .map_err(|e| GovernanceError::corrupt(key, e)),
        None => Ok(None),
    }
}

/// Encode and write a record.
pub(crate) fn save<T, S>(store: &mut S, key: Vec<u8>, value: &T) -> Result<(), GovernanceError>
where
    T: BasicEncode + ?Sized,
    S: StateStore + ?Sized,
{
    let bytes = codec::encode(value).map_err(|e| GovernanceError::corrupt(&key, e))?;
    store.put(key, bytes);
    Ok(())
}

/// Load a bare little-endian `u32`, if present.
pub(crate) fn load_u32<S>(store: &S, key: &[u8]) -> Result<Option<u32>, GovernanceError>
where
    S: StateStore + ?Sized,
{
    match store.get(key)? {
        Some(bytes) => codec::decode_u32(&bytes)
            .map(Some)
            .map_err(|e| GovernanceError::corrupt(key, e)),
        None => Ok(None),
    }
}

/// Write a bare little-endian `u32`.
pub(crate) fn save_u32<S>(store: &mut S, key: Vec<u8>, value: u32)
where
    S: StateStore + ?Sized,
{
    store.put(key, codec::encode_u32(value));
}
