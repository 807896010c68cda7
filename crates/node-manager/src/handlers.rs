//! Entry point handlers.
//!
//! Every handler follows the same shape: decode the input, check who is
//! calling, check every precondition against the store, and only then write.
//! A handler that returns an error has written nothing it would want kept;
//! the host throws away the invocation's writes anyway.

use crate::blacklist::{delete_black_list_item, is_blacklisted, put_black_list_item};
use crate::config::{check_vbft_config, put_config};
use crate::index::{assign_or_reuse, put_candidate_index, put_peer_index};
use crate::pool::{is_initialized, peer_pool_map, put_peer_pool_map};
use crate::registry::{delete_peer_apply, peer_apply, put_peer_apply};
use crate::GovernanceError;
use peergov_core::{Invocation, StateStore, BYTE_TRUE};
use peergov_types::codec::{self, BasicDecode};
use peergov_types::{
    Address, BlackListItem, Configuration, PeerListParam, PeerParam, PeerPoolItem, PeerPoolMap,
    PeerPubkey, RegisterPeerParam, VbftConfig,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
// Shared checks
// ═══════════════════════════════════════════════════════════════════════════

fn decode_input<T: BasicDecode>(input: &[u8]) -> Result<T, GovernanceError> {
    codec::decode(input).map_err(GovernanceError::Deserialization)
}

/// Require a witness for the owner address carried in the call.
fn require_witness<S: StateStore>(
    inv: &Invocation<'_, S>,
    raw_address: &[u8],
) -> Result<Address, GovernanceError> {
    let address = Address::from_slice(raw_address)?;
    if !inv.authority().is_authorized(&address) {
        warn!(%address, "Owner witness missing");
        return Err(GovernanceError::Unauthorized(address));
    }
    Ok(address)
}

/// Require a witness for the current operator.
fn require_operator<S: StateStore>(inv: &Invocation<'_, S>) -> Result<Address, GovernanceError> {
    let operator = inv.authority().current_operator()?;
    if !inv.authority().is_authorized(&operator) {
        warn!(%operator, "Operator witness missing");
        return Err(GovernanceError::Unauthorized(operator));
    }
    Ok(operator)
}

fn pubkey_bytes(peer_pubkey: &PeerPubkey) -> Result<Vec<u8>, GovernanceError> {
    peer_pubkey
        .to_bytes()
        .map_err(|e| GovernanceError::invalid_pubkey(peer_pubkey, e))
}

fn ok() -> Result<Vec<u8>, GovernanceError> {
    Ok(BYTE_TRUE.to_vec())
}

// ═══════════════════════════════════════════════════════════════════════════
// Genesis
// ═══════════════════════════════════════════════════════════════════════════

/// `initConfig`: seed the pool, the index assignments, the counter and the
/// timing configuration. Runs once.
pub fn init_config<S: StateStore>(inv: &mut Invocation<'_, S>) -> Result<Vec<u8>, GovernanceError> {
    let genesis: VbftConfig = decode_input(inv.input())?;

    if is_initialized(inv.store())? {
        warn!("Genesis initialization attempted twice");
        return Err(GovernanceError::AlreadyInitialized);
    }

    let configuration = genesis.configuration();
    check_vbft_config(&configuration)?;

    let mut pool = PeerPoolMap::new();
    let mut assignments = Vec::with_capacity(genesis.peers.len());
    let mut indices = BTreeSet::new();

    for peer in &genesis.peers {
        let bytes = peer
            .peer_pubkey
            .validate()
            .map_err(|e| GovernanceError::invalid_pubkey(&peer.peer_pubkey, e))?;
        let address = Address::from_base58(&peer.address)?;

        if pool.contains(&peer.peer_pubkey) {
            return Err(GovernanceError::DuplicateGenesisPeer(peer.peer_pubkey.clone()));
        }
        if !indices.insert(peer.index) {
            return Err(GovernanceError::DuplicateGenesisIndex(peer.index));
        }

        pool.insert(PeerPoolItem {
            index: peer.index,
            peer_pubkey: peer.peer_pubkey.clone(),
            address,
        });
        assignments.push((bytes, peer.index));
    }

    let next_index = match indices.last() {
        Some(max) => max.checked_add(1).ok_or(GovernanceError::IndexExhausted)?,
        None => 1,
    };

    let store = inv.store_mut();
    put_peer_pool_map(store, &pool)?;
    for (bytes, index) in &assignments {
        put_peer_index(store, bytes, *index);
    }
    put_candidate_index(store, next_index);
    put_config(store, &configuration)?;

    info!(
        peers = pool.len(),
        next_index,
        block_msg_delay = configuration.block_msg_delay,
        hash_msg_delay = configuration.hash_msg_delay,
        peer_handshake_timeout = configuration.peer_handshake_timeout,
        "Governance initialized"
    );
    ok()
}

// ═══════════════════════════════════════════════════════════════════════════
// Owner calls
// ═══════════════════════════════════════════════════════════════════════════

/// `registerCandidate`: file an application for a key.
pub fn register_candidate<S: StateStore>(
    inv: &mut Invocation<'_, S>,
) -> Result<Vec<u8>, GovernanceError> {
    let params: RegisterPeerParam = decode_input(inv.input())?;
    let address = require_witness(inv, &params.address)?;
    let peer_pubkey = params.peer_pubkey;

    let bytes = peer_pubkey
        .validate()
        .map_err(|e| GovernanceError::invalid_pubkey(&peer_pubkey, e))?;

    let pool = peer_pool_map(inv.store())?;
    if is_blacklisted(inv.store(), &bytes)? {
        return Err(GovernanceError::Blacklisted(peer_pubkey));
    }
    if peer_apply(inv.store(), &bytes)?.is_some() {
        return Err(GovernanceError::AlreadyApplied(peer_pubkey));
    }
    if pool.contains(&peer_pubkey) {
        return Err(GovernanceError::AlreadyInPool(peer_pubkey));
    }

    let application = PeerPoolItem::application(peer_pubkey.clone(), address);
    put_peer_apply(inv.store_mut(), &bytes, &application)?;

    info!(%peer_pubkey, %address, "Candidate registered");
    ok()
}

/// `unRegisterCandidate`: withdraw the caller's own application.
pub fn unregister_candidate<S: StateStore>(
    inv: &mut Invocation<'_, S>,
) -> Result<Vec<u8>, GovernanceError> {
    let params: RegisterPeerParam = decode_input(inv.input())?;
    let address = require_witness(inv, &params.address)?;
    let peer_pubkey = params.peer_pubkey;
    let bytes = pubkey_bytes(&peer_pubkey)?;

    let application = peer_apply(inv.store(), &bytes)?
        .ok_or_else(|| GovernanceError::NotApplied(peer_pubkey.clone()))?;
    if application.address != address {
        return Err(GovernanceError::NotOwner {
            peer_pubkey,
            address,
        });
    }

    delete_peer_apply(inv.store_mut(), &bytes);

    info!(%peer_pubkey, %address, "Candidate unregistered");
    ok()
}

/// `quitNode`: the owner takes its peer out of the pool. The index stays
/// reserved for the key.
pub fn quit_node<S: StateStore>(inv: &mut Invocation<'_, S>) -> Result<Vec<u8>, GovernanceError> {
    let params: RegisterPeerParam = decode_input(inv.input())?;
    let address = require_witness(inv, &params.address)?;
    let peer_pubkey = params.peer_pubkey;
    pubkey_bytes(&peer_pubkey)?;

    let mut pool = peer_pool_map(inv.store())?;
    let item = pool
        .get(&peer_pubkey)
        .ok_or_else(|| GovernanceError::NotInPool(peer_pubkey.clone()))?;
    if item.address != address {
        return Err(GovernanceError::NotOwner {
            peer_pubkey,
            address,
        });
    }
    let index = item.index;

    pool.remove(&peer_pubkey);
    put_peer_pool_map(inv.store_mut(), &pool)?;

    info!(%peer_pubkey, %address, index, "Peer quit");
    ok()
}

// ═══════════════════════════════════════════════════════════════════════════
// Operator calls
// ═══════════════════════════════════════════════════════════════════════════

/// `approveCandidate`: move an application into the pool under its
/// permanent index.
pub fn approve_candidate<S: StateStore>(
    inv: &mut Invocation<'_, S>,
) -> Result<Vec<u8>, GovernanceError> {
    require_operator(inv)?;
    let params: PeerParam = decode_input(inv.input())?;
    let peer_pubkey = params.peer_pubkey;
    let bytes = pubkey_bytes(&peer_pubkey)?;

    let mut item = peer_apply(inv.store(), &bytes)?
        .ok_or_else(|| GovernanceError::NotApplied(peer_pubkey.clone()))?;
    let mut pool = peer_pool_map(inv.store())?;
    if pool.contains(&peer_pubkey) {
        return Err(GovernanceError::AlreadyInPool(peer_pubkey));
    }

    let store = inv.store_mut();
    item.index = assign_or_reuse(store, &bytes)?;
    let index = item.index;
    pool.insert(item);
    put_peer_pool_map(store, &pool)?;
    delete_peer_apply(store, &bytes);

    info!(%peer_pubkey, index, "Candidate approved");
    ok()
}

/// `rejectCandidate`: drop an application.
pub fn reject_candidate<S: StateStore>(
    inv: &mut Invocation<'_, S>,
) -> Result<Vec<u8>, GovernanceError> {
    require_operator(inv)?;
    let params: PeerParam = decode_input(inv.input())?;
    let peer_pubkey = params.peer_pubkey;
    let bytes = pubkey_bytes(&peer_pubkey)?;

    if peer_apply(inv.store(), &bytes)?.is_none() {
        return Err(GovernanceError::NotApplied(peer_pubkey));
    }
    delete_peer_apply(inv.store_mut(), &bytes);

    info!(%peer_pubkey, "Candidate rejected");
    ok()
}

/// `blackNode`: ban a batch of pool members. All keys are checked before
/// any is banned.
pub fn black_node<S: StateStore>(inv: &mut Invocation<'_, S>) -> Result<Vec<u8>, GovernanceError> {
    require_operator(inv)?;
    let params: PeerListParam = decode_input(inv.input())?;
    let mut pool = peer_pool_map(inv.store())?;

    let mut seen = BTreeSet::new();
    let mut targets = Vec::with_capacity(params.peer_pubkey_list.len());
    for peer_pubkey in &params.peer_pubkey_list {
        let bytes = pubkey_bytes(peer_pubkey)?;
        // A repeat would already be gone from the pool when its turn came.
        if !pool.contains(peer_pubkey) || !seen.insert(peer_pubkey) {
            return Err(GovernanceError::NotInPool(peer_pubkey.clone()));
        }
        targets.push((peer_pubkey, bytes));
    }

    let store = inv.store_mut();
    for (peer_pubkey, bytes) in &targets {
        if let Some(item) = pool.remove(peer_pubkey) {
            put_black_list_item(store, bytes, &BlackListItem::from(&item))?;
            delete_peer_apply(store, bytes);
            info!(%peer_pubkey, index = item.index, address = %item.address, "Peer blacklisted");
        }
    }
    put_peer_pool_map(store, &pool)?;

    debug!(count = targets.len(), remaining = pool.len(), "Blacklist batch applied");
    ok()
}

/// `whiteNode`: lift a ban. The key must register and be approved again to
/// rejoin.
pub fn white_node<S: StateStore>(inv: &mut Invocation<'_, S>) -> Result<Vec<u8>, GovernanceError> {
    require_operator(inv)?;
    let params: PeerParam = decode_input(inv.input())?;
    let peer_pubkey = params.peer_pubkey;
    let bytes = pubkey_bytes(&peer_pubkey)?;

    if !is_blacklisted(inv.store(), &bytes)? {
        return Err(GovernanceError::NotBlacklisted(peer_pubkey));
    }
    delete_black_list_item(inv.store_mut(), &bytes);

    info!(%peer_pubkey, "Peer removed from blacklist");
    ok()
}

/// `updateConfig`: replace the timing configuration in full.
pub fn update_config<S: StateStore>(
    inv: &mut Invocation<'_, S>,
) -> Result<Vec<u8>, GovernanceError> {
    require_operator(inv)?;
    let configuration: Configuration = decode_input(inv.input())?;
    check_vbft_config(&configuration)?;

    put_config(inv.store_mut(), &configuration)?;

    info!(
        block_msg_delay = configuration.block_msg_delay,
        hash_msg_delay = configuration.hash_msg_delay,
        peer_handshake_timeout = configuration.peer_handshake_timeout,
        "Configuration updated"
    );
    ok()
}
