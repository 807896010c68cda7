//! Replay a script on a simulated chain.

use crate::genesis::GenesisFile;
use crate::script::{Script, ScriptError};
use peergov_node_manager::{keys, GovernanceError, NodeManager};
use peergov_simulation::{
    SimStorage, SimulatedChain, SimulationConfig, SimulationError, SimulationStats,
};
use peergov_types::codec;
use peergov_types::{BlackListItem, Configuration, PeerPoolItem};
use tracing::info;

/// Result of one scripted call.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub method: String,
    pub result: Result<(), GovernanceError>,
}

/// Final state after a replay.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub outcomes: Vec<CallOutcome>,
    pub pool: Vec<PeerPoolItem>,
    pub blacklist: Vec<BlackListItem>,
    pub candidate_index: u32,
    pub config: Option<Configuration>,
    pub stats: SimulationStats,
}

/// Initialize a chain from `genesis` and run every call of `script`.
///
/// Failing calls are recorded and the replay continues.
pub fn replay(genesis: &GenesisFile, script: &Script) -> Result<ReplayReport, ReplayError> {
    let config = SimulationConfig::new().with_bookkeepers(genesis.bookkeepers());
    let mut chain = SimulatedChain::genesis(config, &genesis.to_vbft_config())?;
    info!(
        peers = genesis.peers.len(),
        operator = ?chain.operator_address(),
        "Genesis applied"
    );

    let mut outcomes = Vec::with_capacity(script.calls.len());
    for (position, call) in script.calls.iter().enumerate() {
        let input = call
            .encode_input()
            .map_err(|source| ReplayError::Script { position, source })?;
        let signers = call
            .signers(chain.operator_address())
            .map_err(|source| ReplayError::Script { position, source })?;

        let result = chain.execute(&call.method, &input, &signers).map(|_| ());
        outcomes.push(CallOutcome {
            method: call.method.clone(),
            result,
        });
    }

    let storage = chain.storage();
    Ok(ReplayReport {
        outcomes,
        pool: NodeManager::peer_pool_map(storage)?.iter().cloned().collect(),
        blacklist: blacklist(storage)?,
        candidate_index: NodeManager::candidate_index(storage)?,
        config: NodeManager::config(storage)?,
        stats: chain.stats(),
    })
}

fn blacklist(storage: &SimStorage) -> Result<Vec<BlackListItem>, ReplayError> {
    let mut prefix = keys::NODE_MANAGER_CONTRACT.0.to_vec();
    prefix.extend_from_slice(keys::BLACK_LIST);

    storage
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, value)| {
            codec::decode(value).map_err(|source| GovernanceError::CorruptRecord {
                key: format!("{:?}", key),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(ReplayError::from)
}

impl ReplayReport {
    /// Number of calls that failed.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("Calls:");
        for (position, outcome) in self.outcomes.iter().enumerate() {
            match &outcome.result {
                Ok(()) => println!("  #{:<3} {:<20} ok", position, outcome.method),
                Err(e) => println!(
                    "  #{:<3} {:<20} {}: {}",
                    position,
                    outcome.method,
                    e.kind(),
                    e
                ),
            }
        }

        println!();
        println!("Peer pool ({}):", self.pool.len());
        for item in &self.pool {
            println!("  [{}] {} owner={}", item.index, item.peer_pubkey, item.address);
        }

        println!("Blacklist ({}):", self.blacklist.len());
        for item in &self.blacklist {
            println!("  {} owner={}", item.peer_pubkey, item.address);
        }

        println!("Next candidate index: {}", self.candidate_index);
        if let Some(config) = &self.config {
            println!(
                "Config: block_msg_delay={} hash_msg_delay={} peer_handshake_timeout={}",
                config.block_msg_delay, config.hash_msg_delay, config.peer_handshake_timeout
            );
        }
        println!(
            "Stats: {} calls, {} committed, {} failed",
            self.stats.calls, self.stats.committed, self.stats.failed
        );
    }
}

/// Errors that stop a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Chain setup failed: {0}")]
    Setup(#[from] SimulationError),

    #[error("Script call #{position} is malformed: {source}")]
    Script {
        position: usize,
        source: ScriptError,
    },

    #[error("Failed to read final state: {0}")]
    State(#[from] GovernanceError),
}
