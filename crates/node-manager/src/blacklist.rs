//! Blacklist storage.
//!
//! The existence of an entry is what bars a key from registering; the
//! record itself is an audit snapshot of the peer at the time of the ban.

use crate::keys;
use crate::record;
use crate::GovernanceError;
use peergov_core::StateStore;
use peergov_types::BlackListItem;

/// The blacklist entry for a key, if any.
pub fn black_list_item<S>(store: &S, pubkey: &[u8]) -> Result<Option<BlackListItem>, GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::load(store, &keys::black_list_key(pubkey))
}

/// Whether a key is banned.
pub fn is_blacklisted<S>(store: &S, pubkey: &[u8]) -> Result<bool, GovernanceError>
where
    S: StateStore + ?Sized,
{
    Ok(store.contains(&keys::black_list_key(pubkey))?)
}

pub(crate) fn put_black_list_item<S>(
    store: &mut S,
    pubkey: &[u8],
    item: &BlackListItem,
) -> Result<(), GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::save(store, keys::black_list_key(pubkey), item)
}

pub(crate) fn delete_black_list_item<S>(store: &mut S, pubkey: &[u8])
where
    S: StateStore + ?Sized,
{
    store.delete(&keys::black_list_key(pubkey));
}

#[cfg(test)]
mod tests {
    use super::*;
    use peergov_test_helpers::{address, peer_pubkey, MemoryStore};

    #[test]
    fn test_ban_and_lift() {
        let mut store = MemoryStore::new();
        let pk = peer_pubkey(9);
        let bytes = pk.to_bytes().unwrap();
        let entry = BlackListItem {
            peer_pubkey: pk,
            address: address(9),
        };

        assert!(!is_blacklisted(&store, &bytes).unwrap());

        put_black_list_item(&mut store, &bytes, &entry).unwrap();
        assert!(is_blacklisted(&store, &bytes).unwrap());
        assert_eq!(black_list_item(&store, &bytes).unwrap(), Some(entry));

        delete_black_list_item(&mut store, &bytes);
        assert!(!is_blacklisted(&store, &bytes).unwrap());
    }
}
