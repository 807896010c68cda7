//! Peer records held in governance storage.

use crate::{Address, PeerPubkey};
use sbor::prelude::*;
use std::collections::BTreeMap;

/// A candidate or active consensus peer.
///
/// The same shape is used for pending applications, where `index` is not yet
/// assigned and left at zero.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct PeerPoolItem {
    /// Permanent slot assigned to this key.
    pub index: u32,

    /// The peer's public key.
    pub peer_pubkey: PeerPubkey,

    /// Owner account that registered the key.
    pub address: Address,
}

impl PeerPoolItem {
    /// Create a pending application record (no index yet).
    pub fn application(peer_pubkey: PeerPubkey, address: Address) -> Self {
        Self {
            index: 0,
            peer_pubkey,
            address,
        }
    }
}

/// The peer pool: public key to peer record.
///
/// Backed by a `BTreeMap` so that the encoded form is ordered by key and
/// identical on every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, BasicSbor)]
pub struct PeerPoolMap {
    /// Peers keyed by public key.
    pub peers: BTreeMap<PeerPubkey, PeerPoolItem>,
}

impl PeerPoolMap {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a peer.
    pub fn get(&self, peer_pubkey: &PeerPubkey) -> Option<&PeerPoolItem> {
        self.peers.get(peer_pubkey)
    }

    /// Check membership.
    pub fn contains(&self, peer_pubkey: &PeerPubkey) -> bool {
        self.peers.contains_key(peer_pubkey)
    }

    /// Insert or replace a peer, keyed by its public key.
    pub fn insert(&mut self, item: PeerPoolItem) -> Option<PeerPoolItem> {
        self.peers.insert(item.peer_pubkey.clone(), item)
    }

    /// Remove a peer.
    pub fn remove(&mut self, peer_pubkey: &PeerPubkey) -> Option<PeerPoolItem> {
        self.peers.remove(peer_pubkey)
    }

    /// Iterate peers in key order.
    pub fn iter(&self) -> impl Iterator<Item = &PeerPoolItem> {
        self.peers.values()
    }

    /// Number of peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Audit record written when a peer is banned.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct BlackListItem {
    /// The banned public key.
    pub peer_pubkey: PeerPubkey,

    /// Owner address of the peer at the time of the ban.
    pub address: Address,
}

impl From<&PeerPoolItem> for BlackListItem {
    fn from(item: &PeerPoolItem) -> Self {
        Self {
            peer_pubkey: item.peer_pubkey.clone(),
            address: item.address,
        }
    }
}
