//! VBFT timing configuration and the genesis configuration that seeds it.

use crate::PeerPubkey;
use sbor::prelude::*;

/// Minimum block message delay, in milliseconds.
pub const MIN_BLOCK_MSG_DELAY: u32 = 5000;

/// Minimum hash message delay, in milliseconds.
pub const MIN_HASH_MSG_DELAY: u32 = 5000;

/// Minimum peer handshake timeout, in seconds.
pub const MIN_PEER_HANDSHAKE_TIMEOUT: u32 = 10;

/// Consensus timing parameters stored by governance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BasicSbor)]
pub struct Configuration {
    /// Block message delay in milliseconds.
    pub block_msg_delay: u32,

    /// Hash message delay in milliseconds.
    pub hash_msg_delay: u32,

    /// Peer handshake timeout in seconds.
    pub peer_handshake_timeout: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            block_msg_delay: 10_000,
            hash_msg_delay: 10_000,
            peer_handshake_timeout: 10,
        }
    }
}

/// A peer listed in the genesis configuration.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct VbftPeerInfo {
    /// Index supplied by genesis (not minted by the allocator).
    pub index: u32,

    /// Hex-encoded public key.
    pub peer_pubkey: PeerPubkey,

    /// Base58 owner address.
    pub address: String,
}

/// Genesis input for the node manager: timing parameters and initial peers.
#[derive(Debug, Clone, PartialEq, Eq, BasicSbor)]
pub struct VbftConfig {
    /// Block message delay in milliseconds.
    pub block_msg_delay: u32,

    /// Hash message delay in milliseconds.
    pub hash_msg_delay: u32,

    /// Peer handshake timeout in seconds.
    pub peer_handshake_timeout: u32,

    /// Initial peer set.
    pub peers: Vec<VbftPeerInfo>,
}

impl VbftConfig {
    /// The timing part of this genesis configuration.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            block_msg_delay: self.block_msg_delay,
            hash_msg_delay: self.hash_msg_delay,
            peer_handshake_timeout: self.peer_handshake_timeout,
        }
    }
}
