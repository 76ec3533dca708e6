use super::{ContextSwitchPlan, ReadySetStrategy};
use crate::model::{EntryId, ProcessEntry};

/// Ordered sequence with a cursor; `current` is the element under the
/// cursor. `previous` is set only by `timeslice_over` and consumed by the
/// next `context_switch_plan`.
///
/// **Subtle, by design:** `add` inserts the new arrival *at* the cursor,
/// bumping the incumbent one slot right and making the cursor point at the
/// arrival. The incumbent is not reselected until the next rotation — an
/// arriving process displaces the running one on the very next context
/// switch. This is not a textbook round robin.
#[derive(Debug, Default)]
pub struct RoundRobin {
    queue: Vec<EntryId>,
    cursor: Option<usize>,
    previous: Option<EntryId>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadySetStrategy for RoundRobin {
    fn add(&mut self, id: EntryId, _entries: &[ProcessEntry]) {
        match self.cursor {
            None => {
                self.queue.push(id);
                self.cursor = Some(0);
            }
            Some(idx) => {
                self.queue.insert(idx, id);
                self.cursor = Some(idx);
            }
        }
    }

    fn remove_current(&mut self, _entries: &[ProcessEntry]) {
        let idx = self.cursor.expect("remove_current on an empty RoundRobin");
        self.queue.remove(idx);
        self.previous = None;
        if self.queue.is_empty() {
            self.cursor = None;
        } else if idx == self.queue.len() {
            self.cursor = Some(0);
        }
    }

    fn timeslice_over(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.previous = self.current();
        let idx = self.cursor.expect("nonempty RoundRobin must have a cursor");
        self.cursor = Some((idx + 1) % self.queue.len());
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn current(&self) -> Option<EntryId> {
        self.cursor.map(|idx| self.queue[idx])
    }

    fn context_switch_plan(&mut self) -> ContextSwitchPlan {
        ContextSwitchPlan {
            suspend: self.previous.take(),
            resume: self.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_through_every_member() {
        let mut rr = RoundRobin::new();
        rr.add(1, &[]);
        rr.add(2, &[]);
        assert_eq!(rr.current(), Some(2)); // 2 arrived at the cursor, bumping 1
        rr.timeslice_over();
        assert_eq!(rr.current(), Some(1));
        rr.timeslice_over();
        assert_eq!(rr.current(), Some(2));
    }

    #[test]
    fn late_arrival_displaces_incumbent_at_cursor() {
        let mut rr = RoundRobin::new();
        rr.add(10, &[]); // A
        // B arrives later, at the cursor (currently pointing at A)
        rr.add(20, &[]); // B
        let plan = rr.context_switch_plan();
        assert_eq!(plan.resume, Some(20));
    }

    #[test]
    fn remove_current_wraps_cursor_at_end() {
        let mut rr = RoundRobin::new();
        rr.add(1, &[]);
        rr.add(2, &[]);
        // queue is [2, 1], cursor at 0 (=2)
        rr.timeslice_over(); // cursor -> 1 (=1)
        rr.remove_current(&[]); // remove id 1 at idx 1; idx == new len(1) -> wrap to 0
        assert_eq!(rr.current(), Some(2));
    }

    #[test]
    fn suspend_only_set_by_timeslice_over() {
        let mut rr = RoundRobin::new();
        rr.add(1, &[]);
        assert_eq!(
            rr.context_switch_plan(),
            ContextSwitchPlan {
                suspend: None,
                resume: Some(1)
            }
        );
        rr.timeslice_over(); // single member: rotates to itself
        assert_eq!(
            rr.context_switch_plan(),
            ContextSwitchPlan {
                suspend: Some(1),
                resume: Some(1)
            }
        );
    }
}
