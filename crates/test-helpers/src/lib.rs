//! Test fixtures shared by the governance crates.
//!
//! - Deterministic peer keys and addresses derived from a one-byte seed
//! - A genesis configuration builder
//! - [`MemoryStore`], a plain in-memory [`StateStore`]
//! - [`TestAuthority`], an [`Authority`] with an explicit signer set

use p256::elliptic_curve::sec1::ToEncodedPoint;
use peergov_core::{Authority, AuthorityError, StateStore, StoreError};
use peergov_types::{Address, PeerPubkey, VbftConfig, VbftPeerInfo};
use std::collections::{BTreeMap, BTreeSet};

/// A valid compressed P-256 peer key, distinct for every seed.
pub fn peer_pubkey(seed: u8) -> PeerPubkey {
    let mut scalar = [0x11u8; 32];
    scalar[31] = seed;
    let secret = p256::SecretKey::from_slice(&scalar).expect("scalar is in range");
    let point = secret.public_key().to_encoded_point(true);
    PeerPubkey::from_key_bytes(point.as_bytes())
}

/// An owner address, distinct for every seed.
pub fn address(seed: u8) -> Address {
    Address([seed; 20])
}

/// The operator address used by [`TestAuthority::operator`].
pub fn operator_address() -> Address {
    Address([0xee; 20])
}

/// Genesis with `n` peers at indices `1..=n` and minimum-allowed timings
/// doubled.
///
/// Peer `i` uses `peer_pubkey(i)` and `address(i)`.
pub fn genesis_config(n: u8) -> VbftConfig {
    VbftConfig {
        block_msg_delay: 10_000,
        hash_msg_delay: 10_000,
        peer_handshake_timeout: 20,
        peers: (1..=n)
            .map(|i| VbftPeerInfo {
                index: u32::from(i),
                peer_pubkey: peer_pubkey(i),
                address: address(i).to_base58(),
            })
            .collect(),
    }
}

/// In-memory state store. Writes are visible immediately; there is no
/// commit step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails.
    pub fn failing() -> Self {
        Self {
            entries: BTreeMap::new(),
            fail_reads: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Vec<u8>)> {
        self.entries.iter()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read("injected read failure".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }
}

/// Authority with a fixed operator and an explicit set of witnessed
/// addresses.
#[derive(Debug, Clone, Default)]
pub struct TestAuthority {
    operator: Option<Address>,
    signers: BTreeSet<Address>,
}

impl TestAuthority {
    /// No operator and no signers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator is [`operator_address`] and it has signed.
    pub fn operator() -> Self {
        Self::new()
            .with_operator(operator_address())
            .with_signer(operator_address())
    }

    /// Only `signer` has signed; operator is still [`operator_address`].
    pub fn signed_by(signer: Address) -> Self {
        Self::new()
            .with_operator(operator_address())
            .with_signer(signer)
    }

    pub fn with_operator(mut self, operator: Address) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signers.insert(signer);
        self
    }
}

impl Authority for TestAuthority {
    fn is_authorized(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    fn current_operator(&self) -> Result<Address, AuthorityError> {
        self.operator
            .ok_or_else(|| AuthorityError::OperatorUnavailable("no operator configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_keys_are_valid_and_distinct() {
        let a = peer_pubkey(1);
        let b = peer_pubkey(2);
        assert_ne!(a, b);
        assert!(a.validate().is_ok());
        assert!(peer_pubkey(0).validate().is_ok());
        assert!(peer_pubkey(255).validate().is_ok());
    }

    #[test]
    fn test_genesis_addresses_parse() {
        let genesis = genesis_config(3);
        assert_eq!(genesis.peers.len(), 3);
        for peer in &genesis.peers {
            assert_eq!(
                Address::from_base58(&peer.address).unwrap(),
                address(peer.index as u8)
            );
        }
    }
}
