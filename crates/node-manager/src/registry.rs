//! Candidate registry: pending applications awaiting an operator decision.

use crate::keys;
use crate::record;
use crate::GovernanceError;
use peergov_core::StateStore;
use peergov_types::PeerPoolItem;

/// The pending application for a key, if any.
pub fn peer_apply<S>(store: &S, pubkey: &[u8]) -> Result<Option<PeerPoolItem>, GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::load(store, &keys::peer_apply_key(pubkey))
}

/// Store a pending application.
pub(crate) fn put_peer_apply<S>(
    store: &mut S,
    pubkey: &[u8],
    item: &PeerPoolItem,
) -> Result<(), GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::save(store, keys::peer_apply_key(pubkey), item)
}

/// Remove a pending application.
pub(crate) fn delete_peer_apply<S>(store: &mut S, pubkey: &[u8])
where
    S: StateStore + ?Sized,
{
    store.delete(&keys::peer_apply_key(pubkey));
}

#[cfg(test)]
mod tests {
    use super::*;
    use peergov_test_helpers::{address, peer_pubkey, MemoryStore};

    #[test]
    fn test_apply_lifecycle() {
        let mut store = MemoryStore::new();
        let pk = peer_pubkey(1);
        let bytes = pk.to_bytes().unwrap();
        let item = PeerPoolItem::application(pk, address(1));

        assert_eq!(peer_apply(&store, &bytes).unwrap(), None);

        put_peer_apply(&mut store, &bytes, &item).unwrap();
        assert_eq!(peer_apply(&store, &bytes).unwrap(), Some(item));

        delete_peer_apply(&mut store, &bytes);
        assert_eq!(peer_apply(&store, &bytes).unwrap(), None);
    }
}
