//! Capabilities the host provides to the node manager.

use peergov_types::Address;
use thiserror::Error;

/// Scoped key-value access to the host's state.
///
/// The node manager reads and writes through this trait only. It never
/// assumes that writes are visible to anyone else before the host commits
/// the invocation, and it never assumes they survive a failed invocation.
///
/// # Guarantees expected from the host
///
/// - **Read-your-writes**: `get` after `put`/`delete` in the same invocation
///   observes the new value
/// - **Atomic commit**: all writes of an invocation are committed together,
///   or discarded together when the invocation fails
/// - **Deterministic**: the same sequence of calls yields the same contents
pub trait StateStore {
    /// Read a value.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value, replacing any previous one.
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Delete a value. Deleting a missing key is a no-op.
    fn delete(&mut self, key: &[u8]);

    /// Check whether a key holds a value.
    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &[u8]) {
        (**self).delete(key)
    }
}

/// Authorization primitives supplied by the host.
///
/// Keeps the node manager free of any knowledge about how witnesses are
/// checked or how the operator is derived from the bookkeeper set.
pub trait Authority {
    /// Whether the current transaction proves control of `address`.
    fn is_authorized(&self, address: &Address) -> bool;

    /// Resolve the current operator address.
    fn current_operator(&self) -> Result<Address, AuthorityError>;
}

/// Errors from the host's state store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed to read.
    #[error("Storage read failed: {0}")]
    Read(String),
}

/// Errors from the host's authority capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    /// The operator cannot be derived (e.g. no bookkeepers).
    #[error("Operator unavailable: {0}")]
    OperatorUnavailable(String),
}
