//! Bounded dispatch history.
//!
//! Stores the most recent successfully dispatched actions with
//! capacity-limited ring buffer semantics (oldest evicted first).

use crate::types::ActionRecord;

/// Capacity-limited store of dispatched-action records, oldest first.
#[derive(Debug, Clone)]
pub struct ActionHistory {
    /// Stored records (oldest first).
    records: Vec<ActionRecord>,
    /// Maximum number of records to retain.
    capacity: usize,
}

impl ActionHistory {
    /// Creates a new history with the given maximum capacity.
    ///
    /// When the capacity is exceeded, the oldest records are evicted.
    /// A capacity of zero is clamped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a record, evicting the oldest if at capacity.
    pub fn push(&mut self, record: ActionRecord) {
        if self.records.len() >= self.capacity {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    /// Returns the most recent record, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    /// Returns a snapshot of all records, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.records.clone()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the maximum capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
