//! Genesis file generation.
//!
//! A genesis file is the TOML form of the node manager's genesis input:
//!
//! ```toml
//! block_msg_delay = 10000
//! hash_msg_delay = 10000
//! peer_handshake_timeout = 10
//!
//! [[peers]]
//! index = 1
//! peer_pubkey = "03..."
//! address = "A..."
//! ```
//!
//! An optional `bookkeepers` list overrides who acts as operator; by default
//! the genesis peers do.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use peergov_types::{Address, Configuration, PeerPubkey, VbftConfig, VbftPeerInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML form of a genesis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisFile {
    pub block_msg_delay: u32,
    pub hash_msg_delay: u32,
    pub peer_handshake_timeout: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookkeepers: Vec<String>,

    #[serde(default)]
    pub peers: Vec<GenesisPeer>,
}

/// A genesis peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPeer {
    pub index: u32,
    pub peer_pubkey: String,
    pub address: String,
}

impl GenesisFile {
    /// Read a genesis file from disk.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let text = std::fs::read_to_string(path).map_err(|source| GenesisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, GenesisError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, GenesisError> {
        Ok(toml::to_string(self)?)
    }

    /// The node manager's genesis input. Keys and addresses are checked by
    /// `initConfig` itself, not here.
    pub fn to_vbft_config(&self) -> VbftConfig {
        VbftConfig {
            block_msg_delay: self.block_msg_delay,
            hash_msg_delay: self.hash_msg_delay,
            peer_handshake_timeout: self.peer_handshake_timeout,
            peers: self
                .peers
                .iter()
                .map(|peer| VbftPeerInfo {
                    index: peer.index,
                    peer_pubkey: PeerPubkey::new(peer.peer_pubkey.clone()),
                    address: peer.address.clone(),
                })
                .collect(),
        }
    }

    /// Explicit bookkeepers, if the file lists any.
    pub fn bookkeepers(&self) -> Vec<PeerPubkey> {
        self.bookkeepers
            .iter()
            .map(|key| PeerPubkey::new(key.clone()))
            .collect()
    }
}

/// Deterministic validator key for slot `seed`.
pub fn validator_key(seed: u32) -> Result<PeerPubkey, GenesisError> {
    let mut scalar = [0x22u8; 32];
    scalar[28..].copy_from_slice(&seed.to_be_bytes());
    let secret = p256::SecretKey::from_slice(&scalar).map_err(|_| GenesisError::KeyDerivation(seed))?;
    let point = secret.public_key().to_encoded_point(true);
    Ok(PeerPubkey::from_key_bytes(point.as_bytes()))
}

/// The account controlled by a single key.
pub fn owner_address(peer_pubkey: &PeerPubkey) -> Address {
    Address::from_bookkeepers(std::slice::from_ref(peer_pubkey)).unwrap_or(Address::ZERO)
}

/// Genesis with `validators` peers at indices `1..=validators` and default
/// timing.
pub fn generate_genesis(validators: u32) -> Result<GenesisFile, GenesisError> {
    let defaults = Configuration::default();
    let peers = (1..=validators)
        .map(|index| {
            let key = validator_key(index)?;
            Ok(GenesisPeer {
                index,
                address: owner_address(&key).to_base58(),
                peer_pubkey: key.as_str().to_string(),
            })
        })
        .collect::<Result<Vec<_>, GenesisError>>()?;

    Ok(GenesisFile {
        block_msg_delay: defaults.block_msg_delay,
        hash_msg_delay: defaults.hash_msg_delay,
        peer_handshake_timeout: defaults.peer_handshake_timeout,
        bookkeepers: Vec::new(),
        peers,
    })
}

/// Generate a genesis file as TOML text.
pub fn generate_genesis_toml(validators: u32) -> Result<String, GenesisError> {
    let genesis = generate_genesis(validators)?;
    let body = genesis.to_toml()?;
    Ok(format!(
        "# Generated governance genesis: {} validators\n\n{}",
        validators, body
    ))
}

/// Errors reading or generating genesis files.
#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    #[error("Failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid genesis TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write genesis TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Cannot derive a validator key for seed {0}")]
    KeyDerivation(u32),
}
