//! Core types for peer governance.
//!
//! This crate defines the values the node manager stores and exchanges:
//!
//! - [`Address`] - 20-byte account identifiers (owners, operator)
//! - [`PeerPubkey`] - hex-encoded peer keys and their format rules
//! - [`PeerPoolItem`], [`PeerPoolMap`], [`BlackListItem`] - stored records
//! - [`Configuration`], [`VbftConfig`] - consensus timing parameters
//! - [`RegisterPeerParam`], [`PeerParam`], [`PeerListParam`] - call inputs
//!
//! Everything that crosses the storage or call boundary is SBOR-encoded via
//! the helpers in [`codec`].

mod address;
pub mod codec;
mod config;
mod params;
mod peer;
mod pubkey;

pub use address::{Address, AddressError, ADDRESS_VERSION};
pub use codec::CodecError;
pub use config::{
    Configuration, VbftConfig, VbftPeerInfo, MIN_BLOCK_MSG_DELAY, MIN_HASH_MSG_DELAY,
    MIN_PEER_HANDSHAKE_TIMEOUT,
};
pub use params::{PeerListParam, PeerParam, RegisterPeerParam};
pub use peer::{BlackListItem, PeerPoolItem, PeerPoolMap};
pub use pubkey::{
    PeerPubkey, PubkeyError, CURVE_ED25519, CURVE_P256, KEY_TYPE_ECDSA, KEY_TYPE_EDDSA,
};
