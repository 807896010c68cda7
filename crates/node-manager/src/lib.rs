//! Validator-set governance.
//!
//! The node manager decides which public keys may take part in consensus.
//! Keys move between four regions of state:
//!
//! ```text
//!                 registerCandidate
//!   (outside) ───────────────────────▶ Applications
//!       ▲   ◀─────────────────────────     │
//!       │   unRegisterCandidate /          │ approveCandidate
//!       │   rejectCandidate                ▼ (index assigned or reused)
//!       │                              Peer Pool
//!       │            quitNode              │
//!       ├──────────────────────────────────┤
//!       │                                  │ blackNode
//!       │            whiteNode             ▼
//!       └────────────────────────────── Blacklist
//! ```
//!
//! Alongside these regions the module keeps a permanent index per key (never
//! reassigned once minted) and the VBFT timing configuration.
//!
//! # Entry points
//!
//! | Method | Caller | Effect |
//! |---|---|---|
//! | `initConfig` | genesis | seed pool, indices, counter, configuration |
//! | `registerCandidate` | owner | file an application |
//! | `unRegisterCandidate` | owner | withdraw an application |
//! | `quitNode` | owner | leave the pool |
//! | `approveCandidate` | operator | admit an application |
//! | `rejectCandidate` | operator | drop an application |
//! | `blackNode` | operator | ban pool members, all or nothing |
//! | `whiteNode` | operator | lift a ban |
//! | `updateConfig` | operator | replace the timing configuration |
//!
//! Every call either returns [`BYTE_TRUE`](peergov_core::BYTE_TRUE) or an
//! error. On error the host discards the call's writes.

mod blacklist;
mod config;
mod contract;
mod error;
mod handlers;
mod index;
pub mod keys;
mod pool;
mod record;
mod registry;

pub use blacklist::{black_list_item, is_blacklisted};
pub use config::{check_vbft_config, config};
pub use contract::{Method, NodeManager};
pub use error::{ErrorKind, GovernanceError};
pub use index::{assign_or_reuse, candidate_index, peer_index};
pub use pool::{is_initialized, peer_pool_map};
pub use registry::peer_apply;
