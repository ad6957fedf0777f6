//! The set of currently chosen records for one selector

use super::{CatalogRecord, RecordId, SelectedItem};

/// Result of toggling a record's membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Insertion-ordered records keyed by identity.
///
/// An id appears at most once; inserting a present id is refused rather than
/// duplicated.
#[derive(Debug, Clone)]
pub struct SelectionSet<R> {
    records: Vec<R>,
}

impl<R> Default for SelectionSet<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: CatalogRecord> SelectionSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Add a record; returns false if its id is already present
    pub fn insert(&mut self, record: R) -> bool {
        if self.contains(record.id()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Remove the record if present, otherwise add it
    pub fn toggle(&mut self, record: &R) -> Toggled {
        if self.remove(record.id()).is_some() {
            Toggled::Removed
        } else {
            self.records.push(record.clone());
            Toggled::Added
        }
    }

    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id().clone()).collect()
    }

    pub fn to_selected_items(&self) -> Vec<SelectedItem> {
        self.records.iter().map(|r| r.to_selected_item()).collect()
    }
}
