//! Configuration store and the shared VBFT bounds check.

use crate::keys;
use crate::record;
use crate::GovernanceError;
use peergov_core::StateStore;
use peergov_types::{
    Configuration, MIN_BLOCK_MSG_DELAY, MIN_HASH_MSG_DELAY, MIN_PEER_HANDSHAKE_TIMEOUT,
};

/// Check the timing bounds.
///
/// The single validation routine for both genesis and `updateConfig`.
pub fn check_vbft_config(config: &Configuration) -> Result<(), GovernanceError> {
    let bounds = [
        ("block_msg_delay", config.block_msg_delay, MIN_BLOCK_MSG_DELAY),
        ("hash_msg_delay", config.hash_msg_delay, MIN_HASH_MSG_DELAY),
        (
            "peer_handshake_timeout",
            config.peer_handshake_timeout,
            MIN_PEER_HANDSHAKE_TIMEOUT,
        ),
    ];

    for (field, value, min) in bounds {
        if value < min {
            return Err(GovernanceError::InvalidConfig { field, value, min });
        }
    }
    Ok(())
}

/// The stored configuration, if genesis has run.
pub fn config<S>(store: &S) -> Result<Option<Configuration>, GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::load(store, &keys::vbft_config_key())
}

/// Replace the stored configuration in full.
pub(crate) fn put_config<S>(store: &mut S, config: &Configuration) -> Result<(), GovernanceError>
where
    S: StateStore + ?Sized,
{
    record::save(store, keys::vbft_config_key(), config)
}
