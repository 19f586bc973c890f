//! Value-ordered sliding window shared by the minimizer and syncmer engines
//!
//! Entries are kept sorted ascending by value. Among equal values the entry
//! inserted first stays in front; since positions arrive in increasing order
//! this means the earliest still-in-window position wins ties.

use crate::types::SketchHit;

/// Upper bound on the up-front allocation; wider windows grow on demand.
const MAX_PREALLOCATED: usize = 1024;

#[derive(Debug, Default)]
pub(crate) struct SortedWindow {
    entries: Vec<SketchHit>,
}

impl SortedWindow {
    pub(crate) fn with_width(width: usize) -> Self {
        Self {
            entries: Vec::with_capacity(width.min(MAX_PREALLOCATED)),
        }
    }

    /// Fill phase: append in arrival order, unsorted.
    pub(crate) fn push(&mut self, hit: SketchHit) {
        self.entries.push(hit);
    }

    /// Sort once, when the first window is complete. Stable, so ties keep
    /// arrival order.
    pub(crate) fn sort(&mut self) {
        self.entries.sort_by_key(|hit| hit.value);
    }

    /// Drop the entry at position `expired` and insert `hit` after every
    /// entry of equal or smaller value.
    pub(crate) fn slide(&mut self, expired: usize, hit: SketchHit) {
        if let Some(pos) = self.entries.iter().position(|e| e.index == expired) {
            self.entries.remove(pos);
        }
        let at = self.entries.partition_point(|e| e.value <= hit.value);
        self.entries.insert(at, hit);
    }

    pub(crate) fn min(&self) -> Option<SketchHit> {
        self.entries.first().copied()
    }

    /// Free the buffer once the scan is over.
    pub(crate) fn release(&mut self) {
        self.entries = Vec::new();
    }
}
