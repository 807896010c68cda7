//! Call parameters for the node manager entry points.
//!
//! Each entry point receives one of these SBOR-encoded as its input payload.
//! Addresses travel as raw bytes and are length-checked by the handler, the
//! same way a host passes them through from a transaction.

use crate::PeerPubkey;
use sbor::prelude::*;

/// Parameters for `registerCandidate`, `unRegisterCandidate` and `quitNode`.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct RegisterPeerParam {
    /// Peer public key.
    pub peer_pubkey: PeerPubkey,

    /// Raw owner address bytes (must be 20 bytes).
    pub address: Vec<u8>,
}

/// Parameters for `approveCandidate`, `rejectCandidate` and `whiteNode`.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct PeerParam {
    /// Peer public key.
    pub peer_pubkey: PeerPubkey,
}

/// Parameters for `blackNode`.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct PeerListParam {
    /// Keys to ban, all or nothing.
    pub peer_pubkey_list: Vec<PeerPubkey>,
}
