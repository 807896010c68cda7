//! Committed simulation state.

use crate::overlay::WriteSet;
use im::OrdMap;
use peergov_core::{StateStore, StoreError};

/// Committed key-value state of a simulated chain.
///
/// Backed by a persistent map so that [`SimStorage::snapshot`] is O(1) and
/// iteration is ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStorage {
    entries: OrdMap<Vec<u8>, Vec<u8>>,
}

impl SimStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap copy of the current state.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Apply a committed write set.
    pub fn apply(&mut self, writes: WriteSet) {
        for (key, value) in writes {
            match value {
                Some(value) => {
                    self.entries.insert(key, value);
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Vec<u8>)> {
        self.entries.iter()
    }
}

impl StateStore for SimStorage {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_snapshot_is_isolated() {
        let mut storage = SimStorage::new();
        storage.put(b"a".to_vec(), b"1".to_vec());

        let snapshot = storage.snapshot();
        storage.put(b"a".to_vec(), b"2".to_vec());
        storage.delete(b"a");

        assert_eq!(snapshot.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(storage.get(b"a").unwrap(), None);
    }

    #[test]
    fn test_apply_write_set() {
        let mut storage = SimStorage::new();
        storage.put(b"gone".to_vec(), b"x".to_vec());

        let mut writes = BTreeMap::new();
        writes.insert(b"gone".to_vec(), None);
        writes.insert(b"new".to_vec(), Some(b"y".to_vec()));
        storage.apply(writes);

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(b"new").unwrap(), Some(b"y".to_vec()));
    }
}
