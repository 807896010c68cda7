//! Simulated chain: runs governance calls one at a time over committed state.

use crate::authority::{BookkeeperOperator, CallAuthority};
use crate::overlay::OverlayStore;
use crate::SimStorage;
use peergov_core::{Invocation, BYTE_FALSE};
use peergov_node_manager::{GovernanceError, Method, NodeManager};
use peergov_types::codec::{self, BasicEncode};
use peergov_types::{Address, CodecError, PeerPubkey, VbftConfig};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration for a simulated chain.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Bookkeepers whose derived address acts as operator. Empty means "use
    /// the genesis peers".
    pub bookkeepers: Vec<PeerPubkey>,

    /// Keep a receipt for every call.
    pub keep_receipts: bool,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bookkeeper set.
    pub fn with_bookkeepers(mut self, bookkeepers: Vec<PeerPubkey>) -> Self {
        self.bookkeepers = bookkeepers;
        self
    }

    /// Record a receipt for every call.
    pub fn with_receipts(mut self, keep: bool) -> Self {
        self.keep_receipts = keep;
        self
    }
}

/// Outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Position of the call, starting at zero for genesis.
    pub sequence: u64,
    /// Method name as submitted.
    pub method: String,
    /// Host-level return bytes: `[1]` or `[0]`.
    pub output: Vec<u8>,
    /// The error of a failed call.
    pub error: Option<GovernanceError>,
    /// Number of keys the call committed.
    pub writes: usize,
}

/// Counters over all calls executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub calls: u64,
    pub committed: u64,
    pub failed: u64,
}

/// Errors setting up a simulated chain.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Failed to encode call parameters: {0}")]
    Encode(#[from] CodecError),

    #[error("Genesis failed: {0}")]
    Genesis(GovernanceError),
}

/// A single-threaded chain hosting the node manager.
///
/// Each call runs against an [`OverlayStore`] over the committed state. A
/// successful call's writes are applied atomically; a failed call leaves the
/// committed state exactly as it was.
pub struct SimulatedChain {
    storage: SimStorage,
    operator: BookkeeperOperator,
    config: SimulationConfig,
    stats: SimulationStats,
    receipts: Vec<Receipt>,
}

impl SimulatedChain {
    /// An empty chain, before genesis.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            storage: SimStorage::new(),
            operator: BookkeeperOperator::new(config.bookkeepers.clone()),
            config,
            stats: SimulationStats::default(),
            receipts: Vec::new(),
        }
    }

    /// A chain initialized from `genesis`.
    ///
    /// Without configured bookkeepers, the genesis peers become the
    /// bookkeepers.
    pub fn genesis(config: SimulationConfig, genesis: &VbftConfig) -> Result<Self, SimulationError> {
        let mut chain = Self::new(config);
        if chain.operator.bookkeepers().is_empty() {
            chain.operator = BookkeeperOperator::new(
                genesis.peers.iter().map(|p| p.peer_pubkey.clone()).collect(),
            );
        }

        chain
            .execute_params(Method::InitConfig, genesis, &[])?
            .map_err(SimulationError::Genesis)?;
        Ok(chain)
    }

    /// Execute a call with raw input bytes, signed by `signers`.
    pub fn execute(
        &mut self,
        method: &str,
        input: &[u8],
        signers: &[Address],
    ) -> Result<Vec<u8>, GovernanceError> {
        let sequence = self.stats.calls;
        self.stats.calls += 1;

        let authority = CallAuthority::new(&self.operator, signers);
        let mut overlay = OverlayStore::new(&self.storage);
        let result = {
            let mut inv = Invocation::new(&mut overlay, &authority, input);
            NodeManager::invoke(method, &mut inv)
        };

        let (output, error, writes) = match result {
            Ok(output) => {
                let writes = overlay.into_write_set();
                let count = writes.len();
                self.storage.apply(writes);
                self.stats.committed += 1;
                info!(sequence, method, writes = count, "Call committed");
                (output, None, count)
            }
            Err(e) => {
                drop(overlay);
                self.stats.failed += 1;
                warn!(sequence, method, kind = %e.kind(), error = %e, "Call failed");
                (BYTE_FALSE.to_vec(), Some(e), 0)
            }
        };

        if self.config.keep_receipts {
            self.receipts.push(Receipt {
                sequence,
                method: method.to_string(),
                output: output.clone(),
                error: error.clone(),
                writes,
            });
        }

        match error {
            None => Ok(output),
            Some(e) => Err(e),
        }
    }

    /// Encode `params` and execute `method`.
    pub fn execute_params<T: BasicEncode + ?Sized>(
        &mut self,
        method: Method,
        params: &T,
        signers: &[Address],
    ) -> Result<Result<Vec<u8>, GovernanceError>, SimulationError> {
        let input = codec::encode(params)?;
        debug!(%method, input_len = input.len(), "Encoded call");
        Ok(self.execute(method.name(), &input, signers))
    }

    /// Execute `method` signed by the current operator.
    pub fn execute_as_operator<T: BasicEncode + ?Sized>(
        &mut self,
        method: Method,
        params: &T,
    ) -> Result<Result<Vec<u8>, GovernanceError>, SimulationError> {
        let signers = match self.operator.operator() {
            Ok(operator) => vec![operator],
            Err(_) => Vec::new(),
        };
        self.execute_params(method, params, &signers)
    }

    /// Replace the bookkeeper set, changing the operator for later calls.
    pub fn set_bookkeepers(&mut self, bookkeepers: Vec<PeerPubkey>) {
        self.operator = BookkeeperOperator::new(bookkeepers);
    }

    /// The current operator address, if the bookkeeper set is non-empty.
    pub fn operator_address(&self) -> Option<Address> {
        self.operator.operator().ok()
    }

    /// Committed state.
    pub fn storage(&self) -> &SimStorage {
        &self.storage
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peergov_test_helpers::{address, genesis_config, peer_pubkey};
    use peergov_types::RegisterPeerParam;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_commit_and_discard_are_logged() {
        let mut chain =
            SimulatedChain::genesis(SimulationConfig::new().with_receipts(true), &genesis_config(1))
                .unwrap();
        assert!(logs_contain("Call committed"));

        let params = RegisterPeerParam {
            peer_pubkey: peer_pubkey(4),
            address: address(4).0.to_vec(),
        };
        let result = chain
            .execute_params(Method::RegisterCandidate, &params, &[address(5)])
            .unwrap();

        assert!(result.is_err());
        assert!(logs_contain("Call failed"));
        assert_eq!(
            chain.stats(),
            SimulationStats {
                calls: 2,
                committed: 1,
                failed: 1,
            }
        );
        assert_eq!(chain.receipts()[0].output, vec![1]);
        assert!(chain.receipts()[0].writes > 0);
        assert_eq!(chain.receipts()[1].writes, 0);
    }

    #[test]
    fn test_genesis_failure_is_reported() {
        let mut genesis = genesis_config(1);
        genesis.hash_msg_delay = 1;

        let err = SimulatedChain::genesis(SimulationConfig::new(), &genesis)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SimulationError::Genesis(GovernanceError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_receipts_off_by_default() {
        let chain = SimulatedChain::genesis(SimulationConfig::new(), &genesis_config(1)).unwrap();
        assert!(chain.receipts().is_empty());
        assert!(chain.operator_address().is_some());
    }
}
