//! Host capabilities for peer governance.
//!
//! The node manager is a deterministic, synchronous state machine. Everything
//! it needs from the outside world comes in through the traits defined here:
//!
//! ```text
//! ┌──────────────────────────── Host ─────────────────────────────┐
//! │                                                               │
//! │   StateStore  ── get / put / delete, atomic per invocation    │
//! │   Authority   ── is_authorized(address), current_operator()   │
//! │   input bytes ── SBOR-encoded call parameters                 │
//! │                                                               │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │ Invocation
//!                                 ▼
//!                    NodeManager entry point
//!                                 │
//!                                 ▼
//!                 Ok(BYTE_TRUE) / Err(GovernanceError)
//! ```
//!
//! The host commits the store writes of a successful invocation and discards
//! those of a failed one.

mod invocation;
mod traits;

pub use invocation::{Invocation, BYTE_FALSE, BYTE_TRUE};
pub use traits::{Authority, AuthorityError, StateStore, StoreError};
