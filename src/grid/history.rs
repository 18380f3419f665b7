//! Snapshot undo history for grid edits

use crate::model::Row;

/// Default number of snapshots retained
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear undo stack of full row-collection snapshots.
///
/// Grows on commit, shrinks on undo. There is no redo stack. Every pushed
/// snapshot gets a sequence number that is never reused, so a caller can tell
/// whether the entry it pushed is still the newest one.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: Vec<(u64, Vec<Row>)>,
    next_seq: u64,
    max_size: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history retaining at most `max_size` snapshots (at least one)
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            next_seq: 0,
            max_size: max_size.max(1),
        }
    }

    /// Push a pre-change snapshot, dropping the oldest past the cap
    ///
    /// Returns the snapshot's sequence number.
    pub fn push(&mut self, snapshot: Vec<Row>) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.snapshots.push((seq, snapshot));

        while self.snapshots.len() > self.max_size {
            self.snapshots.remove(0);
        }
        seq
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<Row>> {
        self.snapshots.pop().map(|(_, snapshot)| snapshot)
    }

    /// Sequence number of the most recent snapshot
    pub fn newest_seq(&self) -> Option<u64> {
        self.snapshots.last().map(|(seq, _)| *seq)
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Number of snapshots on the stack
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
