//! In-memory record store holding the collection as last fetched.
//!
//! The store is the single source of truth for derived views. A fetch replaces the
//! whole collection at once; the only other mutation is appending a record the remote
//! source just created. Every mutation bumps [`RecordStore::revision`], which owners
//! compare against to know their derived views are stale.

use crate::domain::{LocationRecord, RecordId};
use std::collections::HashSet;

/// Authoritative, ordered collection of location records.
///
/// Insertion order is fetch order and is preserved across reads. Identifiers are
/// unique: a replace keeps the first occurrence of a duplicated identifier and an
/// append of an existing identifier is ignored.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<LocationRecord>,
    revision: u64,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swaps in a freshly fetched collection.
    ///
    /// Returns the number of records stored after duplicate identifiers are dropped.
    pub fn replace_all(&mut self, records: Vec<LocationRecord>) -> usize {
        let _span = tracing::debug_span!("record_store_replace_all",
            incoming = records.len(),
            previous = self.records.len()
        ).entered();

        let mut seen = HashSet::with_capacity(records.len());
        let unique: Vec<LocationRecord> = records
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.id);
                if !fresh {
                    tracing::warn!(record_id = %record.id, "dropping record with duplicate identifier");
                }
                fresh
            })
            .collect();

        self.records = unique;
        self.revision += 1;

        tracing::debug!(stored = self.records.len(), revision = self.revision, "collection replaced");
        self.records.len()
    }

    /// Appends one record after a successful create.
    ///
    /// Returns `false`, leaving the store untouched, if the identifier is already
    /// present.
    pub fn append(&mut self, record: LocationRecord) -> bool {
        if self.contains(record.id) {
            tracing::warn!(record_id = %record.id, "ignoring append of an identifier already in the store");
            return false;
        }

        tracing::debug!(record_id = %record.id, "record appended");
        self.records.push(record);
        self.revision += 1;
        true
    }

    /// Current collection in fetch order.
    #[must_use]
    pub fn all(&self) -> &[LocationRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&LocationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Monotonic counter bumped by every replace and append.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(id: i64, name: &str) -> LocationRecord {
        LocationRecord::new(RecordId(id), name)
    }

    #[test]
    fn replace_keeps_fetch_order_and_first_duplicate() {
        let mut store = RecordStore::new();
        let stored = store.replace_all(vec![park(3, "C"), park(1, "A"), park(3, "C again"), park(2, "B")]);

        assert_eq!(stored, 3);
        let ids: Vec<i64> = store.all().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.get(RecordId(3)).and_then(|r| r.name.as_deref()), Some("C"));
    }

    #[test]
    fn replace_discards_the_previous_collection() {
        let mut store = RecordStore::new();
        store.replace_all(vec![park(1, "A"), park(2, "B")]);
        store.replace_all(vec![park(9, "Z")]);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(RecordId(1)));
    }

    #[test]
    fn append_adds_to_the_end_without_disturbing_existing_records() {
        let mut store = RecordStore::new();
        store.replace_all(vec![park(1, "A")]);
        let before = store.revision();

        assert!(store.append(park(2, "B")));
        assert_eq!(store.all()[0].id, RecordId(1));
        assert_eq!(store.all()[1].id, RecordId(2));
        assert!(store.revision() > before);
    }

    #[test]
    fn duplicate_append_is_rejected_and_does_not_bump_revision() {
        let mut store = RecordStore::new();
        store.replace_all(vec![park(1, "A")]);
        let before = store.revision();

        assert!(!store.append(park(1, "A duplicate")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), before);
    }
}
