//! Tooling around the governance state machine.
//!
//! - [`genesis`] generates and parses genesis files (TOML)
//! - [`script`] describes a sequence of calls to replay (TOML)
//! - [`replay`] runs a script on a simulated chain and reports the result

pub mod genesis;
pub mod replay;
pub mod script;
