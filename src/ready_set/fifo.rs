use std::collections::VecDeque;

use super::{ContextSwitchPlan, ReadySetStrategy};
use crate::model::{EntryId, ProcessEntry};

/// Ordered sequence; head is current. Never preempts: a resume is issued
/// only when the head changes.
#[derive(Debug, Default)]
pub struct Fifo {
    queue: VecDeque<EntryId>,
    dirty: bool,
}

impl Fifo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadySetStrategy for Fifo {
    fn add(&mut self, id: EntryId, _entries: &[ProcessEntry]) {
        let was_empty = self.queue.is_empty();
        self.queue.push_back(id);
        if was_empty {
            self.dirty = true;
        }
    }

    fn remove_current(&mut self, _entries: &[ProcessEntry]) {
        self.queue.pop_front();
        self.dirty = true;
    }

    fn timeslice_over(&mut self) {
        // no-op: FIFO never preempts on a timeslice
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn current(&self) -> Option<EntryId> {
        self.queue.front().copied()
    }

    fn context_switch_plan(&mut self) -> ContextSwitchPlan {
        let plan = ContextSwitchPlan {
            suspend: None,
            resume: if self.dirty { self.current() } else { None },
        };
        self.dirty = false;
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_current_in_admission_order() {
        let mut f = Fifo::new();
        f.add(10, &[]);
        f.add(20, &[]);
        assert_eq!(f.current(), Some(10));
        f.remove_current(&[]);
        assert_eq!(f.current(), Some(20));
        f.remove_current(&[]);
        assert!(f.is_empty());
    }

    #[test]
    fn resumes_new_head_only_on_change() {
        let mut f = Fifo::new();
        f.add(1, &[]);
        assert_eq!(
            f.context_switch_plan(),
            ContextSwitchPlan {
                suspend: None,
                resume: Some(1)
            }
        );
        f.add(2, &[]);
        assert_eq!(
            f.context_switch_plan(),
            ContextSwitchPlan {
                suspend: None,
                resume: None
            }
        );
    }
}
