//! Overlay store for running one call against committed state.
//!
//! `OverlayStore` wraps the committed [`SimStorage`] and captures every write
//! of a call without touching the base. The runner turns the captured writes
//! into a [`WriteSet`] and applies it only if the call succeeds; dropping the
//! overlay discards them.

use crate::SimStorage;
use peergov_core::{StateStore, StoreError};
use std::collections::BTreeMap;

/// Writes captured during one call. `None` marks a deletion.
pub type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// A store that reads through to a base and keeps its own writes.
///
/// Reads check the overlay first, then fall through to the base store.
pub struct OverlayStore<'a> {
    base: &'a SimStorage,
    writes: WriteSet,
}

impl<'a> OverlayStore<'a> {
    pub fn new(base: &'a SimStorage) -> Self {
        Self {
            base,
            writes: WriteSet::new(),
        }
    }

    /// Number of keys written or deleted so far.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Consume the overlay, yielding its writes.
    pub fn into_write_set(self) -> WriteSet {
        self.writes
    }
}

impl StateStore for OverlayStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.base.get(key),
        }
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        // Deleting a key that exists nowhere leaves nothing to record.
        if self.writes.contains_key(key) || self.base.contains_key(key) {
            self.writes.insert(key.to_vec(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_see_own_writes() {
        let mut base = SimStorage::new();
        base.put(b"k".to_vec(), b"base".to_vec());

        let mut overlay = OverlayStore::new(&base);
        assert_eq!(overlay.get(b"k").unwrap(), Some(b"base".to_vec()));

        overlay.put(b"k".to_vec(), b"new".to_vec());
        assert_eq!(overlay.get(b"k").unwrap(), Some(b"new".to_vec()));

        overlay.delete(b"k");
        assert_eq!(overlay.get(b"k").unwrap(), None);
        assert_eq!(base.get(b"k").unwrap(), Some(b"base".to_vec()));
    }

    #[test]
    fn test_delete_of_missing_key_is_not_recorded() {
        let base = SimStorage::new();
        let mut overlay = OverlayStore::new(&base);

        overlay.delete(b"nothing");
        assert_eq!(overlay.write_count(), 0);
    }

    #[test]
    fn test_dropped_overlay_leaves_base_untouched() {
        let base = SimStorage::new();
        {
            let mut overlay = OverlayStore::new(&base);
            overlay.put(b"k".to_vec(), b"v".to_vec());
        }
        assert!(base.is_empty());
    }
}
