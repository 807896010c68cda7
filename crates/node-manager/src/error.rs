//! Error types for governance calls.

use peergov_core::{AuthorityError, StoreError};
use peergov_types::{Address, AddressError, CodecError, PeerPubkey, PubkeyError};
use std::fmt;
use thiserror::Error;

/// Errors returned by node manager entry points.
///
/// Every error is terminal for the call. The host answers with the failure
/// sentinel and discards all writes the call attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// The input payload does not decode.
    #[error("Contract params deserialize error: {0}")]
    Deserialization(CodecError),

    /// No entry point with this name.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// An address field is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The transaction does not prove control of the required address.
    #[error("Witness check failed for {0}")]
    Unauthorized(Address),

    /// The operator cannot be resolved.
    #[error("Operator unavailable: {0}")]
    OperatorUnavailable(#[from] AuthorityError),

    /// The public key fails the format check.
    #[error("Invalid peer pubkey {peer_pubkey}: {source}")]
    InvalidPubkey {
        /// The offending key.
        peer_pubkey: PeerPubkey,
        /// What is wrong with it.
        source: PubkeyError,
    },

    /// Genesis initialization has already run.
    #[error("initConfig is already executed")]
    AlreadyInitialized,

    /// Genesis initialization has not run yet.
    #[error("Peer pool is not initialized")]
    NotInitialized,

    /// The key is banned.
    #[error("Peer {0} is in the blacklist")]
    Blacklisted(PeerPubkey),

    /// The key already has a pending application.
    #[error("Peer {0} has already applied")]
    AlreadyApplied(PeerPubkey),

    /// The key is already in the peer pool.
    #[error("Peer {0} is already in the peer pool")]
    AlreadyInPool(PeerPubkey),

    /// The genesis peer list repeats a key.
    #[error("Duplicate genesis peer {0}")]
    DuplicateGenesisPeer(PeerPubkey),

    /// The genesis peer list repeats an index.
    #[error("Duplicate genesis index {0}")]
    DuplicateGenesisIndex(u32),

    /// The candidate index counter cannot advance any further.
    #[error("Candidate index space exhausted")]
    IndexExhausted,

    /// A timing parameter is below its minimum.
    #[error("Invalid config: {field} must be >= {min}, got {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Supplied value.
        value: u32,
        /// Minimum allowed value.
        min: u32,
    },

    /// No pending application for the key.
    #[error("Peer {0} is not applied")]
    NotApplied(PeerPubkey),

    /// The key is not in the peer pool.
    #[error("Peer {0} is not in the peer pool")]
    NotInPool(PeerPubkey),

    /// The key is not banned.
    #[error("Peer {0} is not in the blacklist")]
    NotBlacklisted(PeerPubkey),

    /// The claimed address does not own the key.
    #[error("Address {address} is not the owner of peer {peer_pubkey}")]
    NotOwner {
        /// The key.
        peer_pubkey: PeerPubkey,
        /// The address that claimed it.
        address: Address,
    },

    /// The host store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A stored record does not decode or encode.
    #[error("Corrupt record at {key}: {source}")]
    CorruptRecord {
        /// Hex of the storage key.
        key: String,
        /// Codec failure.
        source: CodecError,
    },
}

impl GovernanceError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GovernanceError::Deserialization(_)
            | GovernanceError::UnknownMethod(_)
            | GovernanceError::InvalidAddress(_) => ErrorKind::Deserialization,

            GovernanceError::Unauthorized(_) | GovernanceError::OperatorUnavailable(_) => {
                ErrorKind::Authorization
            }

            GovernanceError::InvalidPubkey { .. }
            | GovernanceError::AlreadyInitialized
            | GovernanceError::NotInitialized
            | GovernanceError::Blacklisted(_)
            | GovernanceError::AlreadyApplied(_)
            | GovernanceError::AlreadyInPool(_)
            | GovernanceError::DuplicateGenesisPeer(_)
            | GovernanceError::DuplicateGenesisIndex(_)
            | GovernanceError::IndexExhausted
            | GovernanceError::InvalidConfig { .. } => ErrorKind::Validation,

            GovernanceError::NotApplied(_)
            | GovernanceError::NotInPool(_)
            | GovernanceError::NotBlacklisted(_) => ErrorKind::NotFound,

            GovernanceError::NotOwner { .. } => ErrorKind::OwnershipMismatch,

            GovernanceError::Storage(_) | GovernanceError::CorruptRecord { .. } => {
                ErrorKind::Storage
            }
        }
    }

    pub(crate) fn invalid_pubkey(peer_pubkey: &PeerPubkey, source: PubkeyError) -> Self {
        GovernanceError::InvalidPubkey {
            peer_pubkey: peer_pubkey.clone(),
            source,
        }
    }

    pub(crate) fn corrupt(key: &[u8], source: CodecError) -> Self {
        GovernanceError::CorruptRecord {
            key: hex::encode(key),
            source,
        }
    }
}

/// Coarse error classes reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input payload.
    Deserialization,
    /// Caller is not the claimed owner or not the operator.
    Authorization,
    /// Input or state rules violated.
    Validation,
    /// No application, pool or blacklist entry for the key.
    NotFound,
    /// Claimed address does not match the stored owner.
    OwnershipMismatch,
    /// Host storage failure or corrupt stored record.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Deserialization => "DeserializationError",
            ErrorKind::Authorization => "AuthorizationError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::OwnershipMismatch => "OwnershipMismatchError",
            ErrorKind::Storage => "StorageError",
        };
        f.write_str(name)
    }
}
