//! Index allocator.
//!
//! Every peer key that has ever been admitted to the pool owns a permanent
//! `u32` slot. Slots are handed out from a persisted counter and remembered
//! per key forever: a key that quits, is banned, is unbanned and re-approved
//! gets its old slot back, and no slot is ever given to a second key.
//!
//! Genesis peers bring their own indices; the counter is then seeded above
//! the highest one.

use crate::keys;
use crate::record;
use crate::GovernanceError;
use peergov_core::StateStore;
use tracing::debug;

/// Permanent index assigned to a key, if any.
pub fn peer_index<S>(store: &S, pubkey: &[u8]) -> Result<Option<u32>, GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::load_u32(store, &keys::peer_index_key(pubkey))
}

/// Record the permanent index of a key.
pub(crate) fn put_peer_index<S>(store: &mut S, pubkey: &[u8], index: u32)
where
    S: StateStore + ?Sized,
{
    record::save_u32(store, keys::peer_index_key(pubkey), index);
}

/// Next unused index. Zero before genesis has seeded the counter.
pub fn candidate_index<S>(store: &S) -> Result<u32, GovernanceError>
where
    S: StateStore + ?Sized,
{
    Ok(record::load_u32(store, &keys::candidate_index_key())?.unwrap_or(0))
}

/// Overwrite the counter.
pub(crate) fn put_candidate_index<S>(store: &mut S, next: u32)
where
    S: StateStore + ?Sized,
{
    record::save_u32(store, keys::candidate_index_key(), next);
}

/// Return the index of `pubkey`, minting a new one if it has none.
///
/// Minting writes the assignment and advances the counter; both writes
/// belong to the caller's invocation. The counter never wraps.
pub fn assign_or_reuse<S>(store: &mut S, pubkey: &[u8]) -> Result<u32, GovernanceError>
where
    S: StateStore + ?Sized,
{
    if let Some(index) = peer_index(store, pubkey)? {
        debug!(index, "Reusing permanent peer index");
        return Ok(index);
    }

    let index = candidate_index(store)?;
    let next = index.checked_add(1).ok_or(GovernanceError::IndexExhausted)?;

    put_peer_index(store, pubkey, index);
    put_candidate_index(store, next);

    debug!(index, next, "Minted peer index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use peergov_test_helpers::MemoryStore;

    #[test]
    fn test_mints_sequential_indices() {
        let mut store = MemoryStore::new();
        put_candidate_index(&mut store, 1);

        assert_eq!(assign_or_reuse(&mut store, b"a").unwrap(), 1);
        assert_eq!(assign_or_reuse(&mut store, b"b").unwrap(), 2);
        assert_eq!(candidate_index(&store).unwrap(), 3);
        assert_eq!(peer_index(&store, b"a").unwrap(), Some(1));
        assert_eq!(peer_index(&store, b"b").unwrap(), Some(2));
    }

    #[test]
    fn test_reuse_does_not_advance_counter() {
        let mut store = MemoryStore::new();
        put_candidate_index(&mut store, 5);

        let first = assign_or_reuse(&mut store, b"a").unwrap();
        let again = assign_or_reuse(&mut store, b"a").unwrap();

        assert_eq!(first, 5);
        assert_eq!(again, 5);
        assert_eq!(candidate_index(&store).unwrap(), 6);
    }

    #[test]
    fn test_genesis_assignment_is_reused() {
        let mut store = MemoryStore::new();
        put_peer_index(&mut store, b"genesis", 3);
        put_candidate_index(&mut store, 4);

        assert_eq!(assign_or_reuse(&mut store, b"genesis").unwrap(), 3);
        assert_eq!(candidate_index(&store).unwrap(), 4);
    }

    #[test]
    fn test_exhausted_counter_fails_without_writes() {
        let mut store = MemoryStore::new();
        put_candidate_index(&mut store, u32::MAX);
        let before = store.clone();

        assert_eq!(
            assign_or_reuse(&mut store, b"a"),
            Err(GovernanceError::IndexExhausted)
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_corrupt_index_is_reported() {
        let mut store = MemoryStore::new();
        store.put(keys::peer_index_key(b"a"), vec![1, 2]);

        let err = peer_index(&store, b"a").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Storage);
    }
}
