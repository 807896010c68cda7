//! Storage key scheme.
//!
//! Every key is prefixed with the node manager's contract address, followed
//! by a region tag and, for per-peer regions, the decoded public key bytes:
//!
//! ```text
//! contract[20] || "peerPool"
//! contract[20] || "candidateIndex"
//! contract[20] || "vbftConfig"
//! contract[20] || "peerApply" || pubkey
//! contract[20] || "peerIndex" || pubkey
//! contract[20] || "blackList" || pubkey
//! ```
//!
//! No region tag is a prefix of another, so keys from different regions
//! never collide.

use peergov_types::Address;

/// Address of the node manager contract; the namespace for all its keys.
pub const NODE_MANAGER_CONTRACT: Address = Address([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0b,
]);

/// Region tag for the peer pool.
pub const PEER_POOL: &[u8] = b"peerPool";

/// Region tag for the candidate index counter.
pub const CANDIDATE_INDEX: &[u8] = b"candidateIndex";

/// Region tag for the VBFT configuration.
pub const VBFT_CONFIG: &[u8] = b"vbftConfig";

/// Region tag for pending applications.
pub const PEER_APPLY: &[u8] = b"peerApply";

/// Region tag for permanent index assignments.
pub const PEER_INDEX: &[u8] = b"peerIndex";

/// Region tag for blacklist entries.
pub const BLACK_LIST: &[u8] = b"blackList";

fn concat_key(parts: &[&[u8]]) -> Vec<u8> {
    let len = NODE_MANAGER_CONTRACT.0.len() + parts.iter().map(|p| p.len()).sum::<usize>();
    let mut key = Vec::with_capacity(len);
    key.extend_from_slice(&NODE_MANAGER_CONTRACT.0);
    for part in parts {
        key.extend_from_slice(part);
    }
    key
}

/// Key of the peer pool.
pub fn peer_pool_key() -> Vec<u8> {
    concat_key(&[PEER_POOL])
}

/// Key of the candidate index counter.
pub fn candidate_index_key() -> Vec<u8> {
    concat_key(&[CANDIDATE_INDEX])
}

/// Key of the VBFT configuration.
pub fn vbft_config_key() -> Vec<u8> {
    concat_key(&[VBFT_CONFIG])
}

/// Key of the pending application for a peer.
pub fn peer_apply_key(pubkey: &[u8]) -> Vec<u8> {
    concat_key(&[PEER_APPLY, pubkey])
}

/// Key of the permanent index assignment for a peer.
pub fn peer_index_key(pubkey: &[u8]) -> Vec<u8> {
    concat_key(&[PEER_INDEX, pubkey])
}

/// Key of the blacklist entry for a peer.
pub fn black_list_key(pubkey: &[u8]) -> Vec<u8> {
    concat_key(&[BLACK_LIST, pubkey])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_tags_are_prefix_free() {
        let tags = [
            PEER_POOL,
            CANDIDATE_INDEX,
            VBFT_CONFIG,
            PEER_APPLY,
            PEER_INDEX,
            BLACK_LIST,
        ];
        for (i, a) in tags.iter().enumerate() {
            for (j, b) in tags.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} prefixes {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_per_peer_keys_are_distinct() {
        let pk = [0x02u8; 33];
        let keys = [peer_apply_key(&pk), peer_index_key(&pk), black_list_key(&pk)];
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);

        for key in &keys {
            assert!(key.starts_with(&NODE_MANAGER_CONTRACT.0));
            assert!(key.ends_with(&pk));
        }
    }

    #[test]
    fn test_layout() {
        let mut expected = NODE_MANAGER_CONTRACT.0.to_vec();
        expected.extend_from_slice(b"peerIndex");
        expected.extend_from_slice(&[0xab, 0xcd]);
        assert_eq!(peer_index_key(&[0xab, 0xcd]), expected);
        assert_eq!(peer_pool_key().len(), 20 + "peerPool".len());
    }
}
