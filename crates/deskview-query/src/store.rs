//! The record store.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a store's contents at one point in time.
///
/// Two keys are equal only if they come from the same store at the same
/// revision, which makes the key suitable for memoizing derived data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub id: u64,
    pub revision: u64,
}

/// An owned collection of records, immutable between revisions.
///
/// The engine only ever reads from the store. Replacing the records bumps
/// the revision, which invalidates anything computed from the previous
/// contents.
#[derive(Debug)]
pub struct RecordStore<T> {
    id: u64,
    revision: u64,
    records: Vec<T>,
}

impl<T> RecordStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        RecordStore {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            revision: 0,
            records,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn key(&self) -> StoreKey {
        StoreKey {
            id: self.id,
            revision: self.revision,
        }
    }

    /// Swaps in a new collection and bumps the revision.
    pub fn replace(&mut self, records: Vec<T>) -> Vec<T> {
        self.revision += 1;
        std::mem::replace(&mut self.records, records)
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        RecordStore::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for RecordStore<T> {
    fn from(records: Vec<T>) -> Self {
        RecordStore::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_bumps_revision() {
        let mut store = RecordStore::new(vec![1, 2, 3]);
        let before = store.key();

        let old = store.replace(vec![4]);
        assert_eq!(old, vec![1, 2, 3]);
        assert_eq!(store.records(), &[4]);
        assert_eq!(store.revision(), 1);
        assert_ne!(store.key(), before);
    }

    #[test]
    fn stores_have_distinct_ids() {
        let a = RecordStore::new(vec![1]);
        let b = RecordStore::new(vec![1]);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), a.key());
    }
}
