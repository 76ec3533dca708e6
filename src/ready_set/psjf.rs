use super::{ContextSwitchPlan, ReadySetStrategy};
use crate::model::{EntryId, ProcessEntry};

/// Preemptive Shortest-Job-First: `current` is recomputed after every event
/// that mutates the ready set.
///
/// Ranking is keyed on `ProcessEntry::remaining`, which equals
/// `burst_length` for the entry's whole lifetime — the parent never
/// observes a child's progress. That makes this a preemptive
/// Shortest-Remaining-Time-Next keyed on the *original* burst rather than
/// on live remaining work; see DESIGN.md for the reasoning behind that
/// choice.
#[derive(Debug, Default)]
pub struct Psjf {
    members: Vec<EntryId>,
    current: Option<EntryId>,
    previous: Option<EntryId>,
}

/// `arg min remaining` over `members`; ties prefer `prior_current` (no
/// unnecessary preemption), else the lowest insertion-order index.
fn select(members: &[EntryId], prior_current: Option<EntryId>, entries: &[ProcessEntry]) -> Option<EntryId> {
    let min_remaining = members.iter().map(|&id| entries[id].remaining).min()?;
    if let Some(cur) = prior_current {
        if members.contains(&cur) && entries[cur].remaining == min_remaining {
            return Some(cur);
        }
    }
    members
        .iter()
        .copied()
        .find(|&id| entries[id].remaining == min_remaining)
}

impl Psjf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadySetStrategy for Psjf {
    fn add(&mut self, id: EntryId, entries: &[ProcessEntry]) {
        self.members.push(id);
        let new_current = select(&self.members, self.current, entries);
        if new_current != self.current {
            self.previous = self.current;
            self.current = new_current;
        }
    }

    fn remove_current(&mut self, entries: &[ProcessEntry]) {
        if let Some(done) = self.current.take() {
            self.members.retain(|&id| id != done);
        }
        self.current = select(&self.members, None, entries);
    }

    fn timeslice_over(&mut self) {
        // no-op: PSJF is driven purely by add/remove, not by slices
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn current(&self) -> Option<EntryId> {
        self.current
    }

    fn context_switch_plan(&mut self) -> ContextSwitchPlan {
        ContextSwitchPlan {
            suspend: self.previous.take(),
            resume: self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(bursts: &[u64]) -> Vec<ProcessEntry> {
        bursts
            .iter()
            .enumerate()
            .map(|(i, &b)| ProcessEntry::new(format!("p{i}"), 0, b))
            .collect()
    }

    #[test]
    fn shorter_arrival_preempts_incumbent() {
        let e = entries(&[5, 2]);
        let mut p = Psjf::new();
        p.add(0, &e); // A alone
        assert_eq!(p.current(), Some(0));
        p.add(1, &e); // B(2) < A(5): preempts
        assert_eq!(p.current(), Some(1));
        assert_eq!(
            p.context_switch_plan(),
            ContextSwitchPlan {
                suspend: Some(0),
                resume: Some(1)
            }
        );
    }

    #[test]
    fn tie_keeps_incumbent_running() {
        let e = entries(&[2, 2]);
        let mut p = Psjf::new();
        p.add(0, &e);
        p.add(1, &e); // tie: incumbent (0) is preferred
        assert_eq!(p.current(), Some(0));
        assert_eq!(p.context_switch_plan().suspend, None);
    }

    #[test]
    fn optimality_after_every_mutation() {
        let e = entries(&[5, 2, 1]);
        let mut p = Psjf::new();
        p.add(0, &e);
        p.add(1, &e);
        p.add(2, &e);
        let cur = p.current().unwrap();
        let min = e.iter().map(|pe| pe.remaining).min().unwrap();
        assert_eq!(e[cur].remaining, min);
    }

    #[test]
    fn remove_current_reselects_minimum() {
        let e = entries(&[5, 2, 1]);
        let mut p = Psjf::new();
        p.add(0, &e);
        p.add(1, &e);
        p.add(2, &e); // current = 2 (rem 1)
        p.remove_current(&e); // 2 terminates -> remaining {0:5, 1:2} -> 1
        assert_eq!(p.current(), Some(1));
    }
}
