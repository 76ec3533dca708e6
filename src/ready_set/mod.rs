//! Ready-Set Strategy: the policy-specific container that holds admitted
//! processes and designates the one the CPU should be running. Four
//! variants share one capability set; the event loop only ever drives the
//! trait, never matches on which variant it holds.

mod fifo;
mod psjf;
mod round_robin;
mod sjf;

pub use fifo::Fifo;
pub use psjf::Psjf;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

use crate::model::{EntryId, Policy, ProcessEntry};

/// What the event loop must do to the OS after an event has been applied:
/// suspend `suspend` (if any) and resume `resume` (if any), in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextSwitchPlan {
    pub suspend: Option<EntryId>,
    pub resume: Option<EntryId>,
}

pub trait ReadySetStrategy {
    fn add(&mut self, id: EntryId, entries: &[ProcessEntry]);

    /// Removes the currently-running entry (it just terminated).
    fn remove_current(&mut self, entries: &[ProcessEntry]);

    /// No-op for every policy except Round Robin.
    fn timeslice_over(&mut self);

    fn is_empty(&self) -> bool;

    fn current(&self) -> Option<EntryId>;

    /// Consumes any pending suspend and reports what context_switch should do.
    fn context_switch_plan(&mut self) -> ContextSwitchPlan;
}

/// Tagged variant owned by the event loop.
pub enum ReadySet {
    Fifo(Fifo),
    RoundRobin(RoundRobin),
    Sjf(Sjf),
    Psjf(Psjf),
}

impl ReadySet {
    pub fn new(policy: Policy) -> Self {
        match policy {
            Policy::Fifo => ReadySet::Fifo(Fifo::new()),
            Policy::RoundRobin => ReadySet::RoundRobin(RoundRobin::new()),
            Policy::Sjf => ReadySet::Sjf(Sjf::new()),
            Policy::Psjf => ReadySet::Psjf(Psjf::new()),
        }
    }
}

impl ReadySetStrategy for ReadySet {
    fn add(&mut self, id: EntryId, entries: &[ProcessEntry]) {
        match self {
            ReadySet::Fifo(s) => s.add(id, entries),
            ReadySet::RoundRobin(s) => s.add(id, entries),
            ReadySet::Sjf(s) => s.add(id, entries),
            ReadySet::Psjf(s) => s.add(id, entries),
        }
    }

    fn remove_current(&mut self, entries: &[ProcessEntry]) {
        match self {
            ReadySet::Fifo(s) => s.remove_current(entries),
            ReadySet::RoundRobin(s) => s.remove_current(entries),
            ReadySet::Sjf(s) => s.remove_current(entries),
            ReadySet::Psjf(s) => s.remove_current(entries),
        }
    }

    fn timeslice_over(&mut self) {
        match self {
            ReadySet::Fifo(s) => s.timeslice_over(),
            ReadySet::RoundRobin(s) => s.timeslice_over(),
            ReadySet::Sjf(s) => s.timeslice_over(),
            ReadySet::Psjf(s) => s.timeslice_over(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            ReadySet::Fifo(s) => s.is_empty(),
            ReadySet::RoundRobin(s) => s.is_empty(),
            ReadySet::Sjf(s) => s.is_empty(),
            ReadySet::Psjf(s) => s.is_empty(),
        }
    }

    fn current(&self) -> Option<EntryId> {
        match self {
            ReadySet::Fifo(s) => s.current(),
            ReadySet::RoundRobin(s) => s.current(),
            ReadySet::Sjf(s) => s.current(),
            ReadySet::Psjf(s) => s.current(),
        }
    }

    fn context_switch_plan(&mut self) -> ContextSwitchPlan {
        match self {
            ReadySet::Fifo(s) => s.context_switch_plan(),
            ReadySet::RoundRobin(s) => s.context_switch_plan(),
            ReadySet::Sjf(s) => s.context_switch_plan(),
            ReadySet::Psjf(s) => s.context_switch_plan(),
        }
    }
}
