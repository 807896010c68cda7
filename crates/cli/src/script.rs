//! Call scripts.
//!
//! A script is a list of calls replayed in order:
//!
//! ```toml
//! [[calls]]
//! method = "registerCandidate"
//! peer_pubkey = "03..."
//! address = "A..."
//! signers = ["A..."]
//!
//! [[calls]]
//! method = "approveCandidate"
//! peer_pubkey = "03..."
//! as_operator = true
//! ```
//!
//! Parameters a method does not use are ignored. A method name the node
//! manager does not know is still submitted, with an empty payload.

use peergov_node_manager::Method;
use peergov_types::codec;
use peergov_types::{
    Address, AddressError, CodecError, Configuration, PeerListParam, PeerParam, PeerPubkey,
    RegisterPeerParam,
};
use serde::Deserialize;
use std::path::Path;

/// A sequence of calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub calls: Vec<ScriptCall>,
}

/// One scripted call.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptCall {
    pub method: String,

    /// Base58 addresses that sign the call.
    #[serde(default)]
    pub signers: Vec<String>,

    /// Also sign with the current operator.
    #[serde(default)]
    pub as_operator: bool,

    pub peer_pubkey: Option<String>,
    pub address: Option<String>,

    #[serde(default)]
    pub peer_pubkeys: Vec<String>,

    pub block_msg_delay: Option<u32>,
    pub hash_msg_delay: Option<u32>,
    pub peer_handshake_timeout: Option<u32>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(text)?)
    }
}

impl ScriptCall {
    /// Encode the call's payload for its method.
    pub fn encode_input(&self) -> Result<Vec<u8>, ScriptError> {
        let Some(method) = Method::from_name(&self.method) else {
            return Ok(Vec::new());
        };

        let bytes = match method {
            Method::RegisterCandidate | Method::UnRegisterCandidate | Method::QuitNode => {
                codec::encode(&RegisterPeerParam {
                    peer_pubkey: self.peer_pubkey()?,
                    address: self.address()?.0.to_vec(),
                })?
            }
            Method::ApproveCandidate | Method::RejectCandidate | Method::WhiteNode => {
                codec::encode(&PeerParam {
                    peer_pubkey: self.peer_pubkey()?,
                })?
            }
            Method::BlackNode => codec::encode(&PeerListParam {
                peer_pubkey_list: self
                    .peer_pubkeys
                    .iter()
                    .map(|key| PeerPubkey::new(key.clone()))
                    .collect(),
            })?,
            Method::UpdateConfig => codec::encode(&Configuration {
                block_msg_delay: self.required(self.block_msg_delay, "block_msg_delay")?,
                hash_msg_delay: self.required(self.hash_msg_delay, "hash_msg_delay")?,
                peer_handshake_timeout: self
                    .required(self.peer_handshake_timeout, "peer_handshake_timeout")?,
            })?,
            Method::InitConfig => return Err(ScriptError::GenesisInScript),
        };
        Ok(bytes)
    }

    /// Parsed signer addresses, plus `operator` if the call asks for it.
    pub fn signers(&self, operator: Option<Address>) -> Result<Vec<Address>, ScriptError> {
        let mut signers = self
            .signers
            .iter()
            .map(|text| Address::from_base58(text))
            .collect::<Result<Vec<_>, _>>()?;
        if self.as_operator {
            signers.extend(operator);
        }
        Ok(signers)
    }

    fn peer_pubkey(&self) -> Result<PeerPubkey, ScriptError> {
        self.peer_pubkey
            .as_deref()
            .map(PeerPubkey::from)
            .ok_or_else(|| self.missing("peer_pubkey"))
    }

    fn address(&self) -> Result<Address, ScriptError> {
        let text = self.address.as_deref().ok_or_else(|| self.missing("address"))?;
        Ok(Address::from_base58(text)?)
    }

    fn required(&self, value: Option<u32>, field: &'static str) -> Result<u32, ScriptError> {
        value.ok_or_else(|| self.missing(field))
    }

    fn missing(&self, field: &'static str) -> ScriptError {
        ScriptError::MissingField {
            method: self.method.clone(),
            field,
        }
    }
}

/// Errors reading a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{method} needs `{field}`")]
    MissingField {
        method: String,
        field: &'static str,
    },

    #[error("Invalid address in script: {0}")]
    Address(#[from] AddressError),

    #[error("Failed to encode call: {0}")]
    Encode(#[from] CodecError),

    #[error("initConfig comes from the genesis file, not the script")]
    GenesisInScript,
}
