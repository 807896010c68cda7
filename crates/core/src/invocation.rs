//! Per-call execution context.

use crate::{Authority, StateStore};

/// Canonical success sentinel returned by every entry point.
pub const BYTE_TRUE: [u8; 1] = [1];

/// Canonical failure sentinel, paired with an error by the host.
pub const BYTE_FALSE: [u8; 1] = [0];

/// Everything a single entry-point call may touch.
///
/// An invocation lives for exactly one call. Nothing in it is carried over
/// to the next call: every call reloads what it needs from `store`.
pub struct Invocation<'a, S: StateStore> {
    store: &'a mut S,
    authority: &'a dyn Authority,
    input: &'a [u8],
}

impl<'a, S: StateStore> Invocation<'a, S> {
    /// Create an invocation over a store, an authority and an input payload.
    pub fn new(store: &'a mut S, authority: &'a dyn Authority, input: &'a [u8]) -> Self {
        Self {
            store,
            authority,
            input,
        }
    }

    /// The encoded call parameters.
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// The host authority.
    pub fn authority(&self) -> &'a dyn Authority {
        self.authority
    }

    /// Read access to the store.
    pub fn store(&self) -> &S {
        &*self.store
    }

    /// Write access to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut *self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthorityError, StoreError};
    use peergov_types::Address;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapStore(HashMap<Vec<u8>, Vec<u8>>);

    impl StateStore for MapStore {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
            Ok(self.0.get(key).cloned())
        }

        fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
            self.0.insert(key, value);
        }

        fn delete(&mut self, key: &[u8]) {
            self.0.remove(key);
        }
    }

    struct Nobody;

    impl Authority for Nobody {
        fn is_authorized(&self, _address: &Address) -> bool {
            false
        }

        fn current_operator(&self) -> Result<Address, AuthorityError> {
            Err(AuthorityError::OperatorUnavailable("none".into()))
        }
    }

    #[test]
    fn test_writes_through_invocation_reach_store() {
        let mut store = MapStore::default();
        {
            let mut inv = Invocation::new(&mut store, &Nobody, b"params");
            assert_eq!(inv.input(), b"params");
            assert!(!inv.authority().is_authorized(&Address::ZERO));

            inv.store_mut().put(b"k".to_vec(), b"v".to_vec());
            assert!(inv.store().contains(b"k").unwrap());
        }
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    fn write_marker<S: StateStore>(mut store: S) {
        store.put(b"marker".to_vec(), vec![1]);
    }

    #[test]
    fn test_mut_ref_store_delegates() {
        let mut store = MapStore::default();
        write_marker(&mut store);
        assert_eq!(store.get(b"marker").unwrap(), Some(vec![1]));
    }
}
