//! Arrival Queue: an ordered, never-growing sequence of not-yet-admitted
//! entries, sorted by arrival offset ascending with ties broken by input
//! order.

use crate::model::{EntryId, ProcessEntry};

/// Consumed head-first. Holds stable indices into the owning `Workload`,
/// never owned copies.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    order: Vec<EntryId>,
    head: usize,
    last_popped_offset: Option<u64>,
}

impl ArrivalQueue {
    /// Builds the queue from the workload's entries, sorted ascending by
    /// `arrival_offset` with a stable sort so input order breaks ties.
    pub fn new(entries: &[ProcessEntry]) -> Self {
        let mut order: Vec<EntryId> = (0..entries.len()).collect();
        order.sort_by_key(|&i| entries[i].arrival_offset);
        Self {
            order,
            head: 0,
            last_popped_offset: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head >= self.order.len()
    }

    /// Time units from the previously-popped arrival offset to the next
    /// one, or from 0 to the first. Undefined (panics) when empty.
    pub fn peek_gap(&self, entries: &[ProcessEntry]) -> u64 {
        assert!(!self.is_empty(), "peek_gap on an empty ArrivalQueue");
        let next_offset = entries[self.order[self.head]].arrival_offset;
        let base = self.last_popped_offset.unwrap_or(0);
        next_offset - base
    }

    /// Returns the next entry's id and advances the head.
    pub fn pop(&mut self, entries: &[ProcessEntry]) -> EntryId {
        assert!(!self.is_empty(), "pop on an empty ArrivalQueue");
        let id = self.order[self.head];
        self.last_popped_offset = Some(entries[id].arrival_offset);
        self.head += 1;
        id
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProcessEntry;

    fn entries(offsets: &[u64]) -> Vec<ProcessEntry> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, &o)| ProcessEntry::new(format!("p{i}"), o, 1))
            .collect()
    }

    #[test]
    fn sorted_ascending_with_stable_ties() {
        let e = entries(&[5, 0, 0, 3]);
        let q = ArrivalQueue::new(&e);
        assert_eq!(q.order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn gap_from_zero_then_between_arrivals() {
        let e = entries(&[2, 2, 5]);
        let mut q = ArrivalQueue::new(&e);
        assert_eq!(q.peek_gap(&e), 2);
        q.pop(&e);
        assert_eq!(q.peek_gap(&e), 0);
        q.pop(&e);
        assert_eq!(q.peek_gap(&e), 3);
        q.pop(&e);
        assert!(q.is_empty());
    }

    #[test]
    fn drains_strictly_head_first() {
        let e = entries(&[0, 1, 2]);
        let mut q = ArrivalQueue::new(&e);
        assert_eq!(q.pop(&e), 0);
        assert_eq!(q.pop(&e), 1);
        assert_eq!(q.remaining(), 1);
        assert_eq!(q.pop(&e), 2);
        assert!(q.is_empty());
    }
}
