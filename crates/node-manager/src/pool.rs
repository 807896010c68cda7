//! Peer pool storage.
//!
//! The whole pool is one record. Every call that changes membership loads
//! it, edits it in memory and writes it back in full.

use crate::keys;
use crate::record;
use crate::GovernanceError;
use peergov_core::StateStore;
use peergov_types::PeerPoolMap;

/// Whether genesis has written the pool.
pub fn is_initialized<S>(store: &S) -> Result<bool, GovernanceError>
where
    S: StateStore + ?Sized,
{
    Ok(store.contains(&keys::peer_pool_key())?)
}

/// Load the peer pool. Fails with `NotInitialized` before genesis.
pub fn peer_pool_map<S>(store: &S) -> Result<PeerPoolMap, GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::load(store, &keys::peer_pool_key())?.ok_or(GovernanceError::NotInitialized)
}

/// Write the peer pool.
pub(crate) fn put_peer_pool_map<S>(store: &mut S, pool: &PeerPoolMap) -> Result<(), GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::save(store, keys::peer_pool_key(), pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use peergov_test_helpers::{address, peer_pubkey, MemoryStore};
    use peergov_types::PeerPoolItem;

    #[test]
    fn test_uninitialized_pool() {
        let store = MemoryStore::new();
        assert!(!is_initialized(&store).unwrap());
        assert_eq!(
            peer_pool_map(&store),
            Err(GovernanceError::NotInitialized)
        );
    }

    #[test]
    fn test_empty_pool_counts_as_initialized() {
        let mut store = MemoryStore::new();
        put_peer_pool_map(&mut store, &PeerPoolMap::new()).unwrap();

        assert!(is_initialized(&store).unwrap());
        assert!(peer_pool_map(&store).unwrap().is_empty());
    }

    #[test]
    fn test_pool_write_back() {
        let mut store = MemoryStore::new();
        let mut pool = PeerPoolMap::new();
        pool.insert(PeerPoolItem {
            index: 2,
            peer_pubkey: peer_pubkey(2),
            address: address(2),
        });
        put_peer_pool_map(&mut store, &pool).unwrap();

        assert_eq!(peer_pool_map(&store).unwrap(), pool);
    }
}
