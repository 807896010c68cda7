//! Deterministic in-memory host for the node manager.
//!
//! Runs governance calls the way a chain would: one at a time, each against
//! a private overlay, committing the overlay only when the call succeeds.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    SimulatedChain                       │
//! │                                                         │
//! │   execute(method, input, signers)                       │
//! │        │                                                │
//! │        ▼                                                │
//! │  ┌──────────────────────┐   ┌────────────────────────┐  │
//! │  │ OverlayStore         │──▶│ SimStorage (im::OrdMap)│  │
//! │  │ captures writes      │   │ committed state        │  │
//! │  └──────────┬───────────┘   └────────────────────────┘  │
//! │             │ NodeManager::invoke                       │
//! │             ▼                                           │
//! │     Ok  → apply write set                               │
//! │     Err → drop overlay                                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The operator is derived from the bookkeeper set by
//! [`BookkeeperOperator`]; signers are passed per call.

mod authority;
mod overlay;
mod runner;
mod storage;

pub use authority::{BookkeeperOperator, CallAuthority};
pub use overlay::{OverlayStore, WriteSet};
pub use runner::{Receipt, SimulatedChain, SimulationConfig, SimulationError, SimulationStats};
pub use storage::SimStorage;
