//! Method dispatch and read-only queries.

use crate::handlers;
use crate::GovernanceError;
use peergov_core::{Invocation, StateStore};
use peergov_types::{BlackListItem, Configuration, PeerPoolItem, PeerPoolMap, PeerPubkey};
use std::fmt;
use tracing::debug;

/// A node manager entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    InitConfig,
    RegisterCandidate,
    UnRegisterCandidate,
    QuitNode,
    ApproveCandidate,
    RejectCandidate,
    BlackNode,
    WhiteNode,
    UpdateConfig,
}

impl Method {
    /// Every entry point, in registration order.
    pub const ALL: [Method; 9] = [
        Method::InitConfig,
        Method::RegisterCandidate,
        Method::UnRegisterCandidate,
        Method::QuitNode,
        Method::ApproveCandidate,
        Method::RejectCandidate,
        Method::BlackNode,
        Method::WhiteNode,
        Method::UpdateConfig,
    ];

    /// The name callers use to invoke this entry point.
    pub fn name(self) -> &'static str {
        match self {
            Method::InitConfig => "initConfig",
            Method::RegisterCandidate => "registerCandidate",
            Method::UnRegisterCandidate => "unRegisterCandidate",
            Method::QuitNode => "quitNode",
            Method::ApproveCandidate => "approveCandidate",
            Method::RejectCandidate => "rejectCandidate",
            Method::BlackNode => "blackNode",
            Method::WhiteNode => "whiteNode",
            Method::UpdateConfig => "updateConfig",
        }
    }

    /// Look up an entry point by name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The node manager contract.
///
/// Stateless: everything lives in the invocation's store, and every call
/// reloads what it needs.
pub struct NodeManager;

impl NodeManager {
    /// Route a call by method name.
    pub fn invoke<S: StateStore>(
        method: &str,
        inv: &mut Invocation<'_, S>,
    ) -> Result<Vec<u8>, GovernanceError> {
        let method =
            Method::from_name(method).ok_or_else(|| GovernanceError::UnknownMethod(method.into()))?;
        Self::call(method, inv)
    }

    /// Run an entry point.
    pub fn call<S: StateStore>(
        method: Method,
        inv: &mut Invocation<'_, S>,
    ) -> Result<Vec<u8>, GovernanceError> {
        debug!(%method, input_len = inv.input().len(), "Dispatching governance call");
        match method {
            Method::InitConfig => handlers::init_config(inv),
            Method::RegisterCandidate => handlers::register_candidate(inv),
            Method::UnRegisterCandidate => handlers::unregister_candidate(inv),
            Method::QuitNode => handlers::quit_node(inv),
            Method::ApproveCandidate => handlers::approve_candidate(inv),
            Method::RejectCandidate => handlers::reject_candidate(inv),
            Method::BlackNode => handlers::black_node(inv),
            Method::WhiteNode => handlers::white_node(inv),
            Method::UpdateConfig => handlers::update_config(inv),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────
    //
    // No authorization and no writes. Keys are given in text form and must
    // be lowercase hex.

    /// The current peer pool.
    pub fn peer_pool_map<S: StateStore + ?Sized>(store: &S) -> Result<PeerPoolMap, GovernanceError> {
        crate::pool::peer_pool_map(store)
    }

    /// The pending application of a key.
    pub fn peer_apply<S: StateStore + ?Sized>(
        store: &S,
        peer_pubkey: &PeerPubkey,
    ) -> Result<Option<PeerPoolItem>, GovernanceError> {
        crate::registry::peer_apply(store, &query_bytes(peer_pubkey)?)
    }

    /// The next index the allocator would mint.
    pub fn candidate_index<S: StateStore + ?Sized>(store: &S) -> Result<u32, GovernanceError> {
        crate::index::candidate_index(store)
    }

    /// The permanent index of a key, if it was ever admitted.
    pub fn peer_index<S: StateStore + ?Sized>(
        store: &S,
        peer_pubkey: &PeerPubkey,
    ) -> Result<Option<u32>, GovernanceError> {
        crate::index::peer_index(store, &query_bytes(peer_pubkey)?)
    }

    /// The blacklist entry of a key.
    pub fn black_list_item<S: StateStore + ?Sized>(
        store: &S,
        peer_pubkey: &PeerPubkey,
    ) -> Result<Option<BlackListItem>, GovernanceError> {
        crate::blacklist::black_list_item(store, &query_bytes(peer_pubkey)?)
    }

    /// The current timing configuration.
    pub fn config<S: StateStore + ?Sized>(
        store: &S,
    ) -> Result<Option<Configuration>, GovernanceError> {
        crate::config::config(store)
    }
}

fn query_bytes(peer_pubkey: &PeerPubkey) -> Result<Vec<u8>, GovernanceError> {
    peer_pubkey
        .to_bytes()
        .map_err(|e| GovernanceError::invalid_pubkey(peer_pubkey, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use peergov_test_helpers::{
        address, genesis_config, peer_pubkey, MemoryStore, TestAuthority,
    };
    use peergov_types::{codec, PeerParam, RegisterPeerParam};

    #[test]
    fn test_method_names_roundtrip() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.name()), Some(method));
        }
        assert_eq!(Method::from_name("InitConfig"), None);
    }

    #[test]
    fn test_unknown_method() {
        let mut store = MemoryStore::new();
        let authority = TestAuthority::new();
        let mut inv = Invocation::new(&mut store, &authority, &[]);

        let err = NodeManager::invoke("mint", &mut inv).unwrap_err();
        assert_eq!(err, GovernanceError::UnknownMethod("mint".to_string()));
        assert_eq!(err.kind(), ErrorKind::Deserialization);
    }

    #[test]
    fn test_invoke_routes_by_name() {
        let mut store = MemoryStore::new();
        let authority = TestAuthority::signed_by(address(5));

        let genesis = codec::encode(&genesis_config(2)).unwrap();
        let result = NodeManager::invoke("initConfig", &mut Invocation::new(&mut store, &authority, &genesis));
        assert_eq!(result.unwrap(), vec![1]);

        let register = codec::encode(&RegisterPeerParam {
            peer_pubkey: peer_pubkey(5),
            address: address(5).0.to_vec(),
        })
        .unwrap();
        NodeManager::invoke(
            "registerCandidate",
            &mut Invocation::new(&mut store, &authority, &register),
        )
        .unwrap();

        let pending = NodeManager::peer_apply(&store, &peer_pubkey(5)).unwrap().unwrap();
        assert_eq!(pending.address, address(5));
        assert_eq!(NodeManager::peer_pool_map(&store).unwrap().len(), 2);
        assert_eq!(NodeManager::candidate_index(&store).unwrap(), 3);
        assert_eq!(NodeManager::peer_index(&store, &peer_pubkey(2)).unwrap(), Some(2));
        assert_eq!(NodeManager::black_list_item(&store, &peer_pubkey(2)).unwrap(), None);
        assert!(NodeManager::config(&store).unwrap().is_some());
    }

    #[test]
    fn test_query_rejects_non_hex_key() {
        let store = MemoryStore::new();
        let err = NodeManager::peer_index(&store, &PeerPubkey::new("XYZ")).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidPubkey { .. }));

        let param = PeerParam {
            peer_pubkey: PeerPubkey::new("02AB"),
        };
        let mut store = MemoryStore::new();
        let authority = TestAuthority::operator();
        let input = codec::encode(&param).unwrap();
        let mut inv = Invocation::new(&mut store, &authority, &input);
        let err = NodeManager::call(Method::WhiteNode, &mut inv).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidPubkey { .. }));
    }
}
