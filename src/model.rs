//! Core data model: the workload store and the lifecycle of one admitted process.

use std::fmt;

/// One of the four pluggable dispatch disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fifo,
    RoundRobin,
    Sjf,
    Psjf,
}

impl Policy {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "FIFO" => Some(Policy::Fifo),
            "RR" => Some(Policy::RoundRobin),
            "SJF" => Some(Policy::Sjf),
            "PSJF" => Some(Policy::Psjf),
            _ => None,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Policy::Fifo => "FIFO",
            Policy::RoundRobin => "RR",
            Policy::Sjf => "SJF",
            Policy::Psjf => "PSJF",
        };
        f.write_str(s)
    }
}

/// Lifecycle of a single admitted or admittable process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Ready,
    Running,
    Terminated,
}

/// Stable index into [`Workload::entries`]. The arrival queue and ready-set
/// strategies hold these, never owned copies, so there is exactly one owner
/// of process state.
pub type EntryId = usize;

/// One admitted or admittable process.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub name: String,
    pub arrival_offset: u64,
    pub burst_length: u64,
    /// Time units still to execute. The parent never observes the child
    /// mutating this value, so it equals `burst_length` for the entry's
    /// entire lifetime and is what SJF/PSJF rank on. Kept as a field,
    /// rather than collapsed into `burst_length`, so a future reader can
    /// see the field the ranking functions are defined over.
    pub remaining: u64,
    pub os_pid: Option<nix::unistd::Pid>,
    pub status: Status,
}

impl ProcessEntry {
    pub fn new(name: String, arrival_offset: u64, burst_length: u64) -> Self {
        Self {
            name,
            arrival_offset,
            burst_length,
            remaining: burst_length,
            os_pid: None,
            status: Status::NotStarted,
        }
    }
}

/// Per-child timing bookkeeping. Opaque to the scheduling core: it is handed
/// by reference to the time-recording sink and never interpreted for
/// dispatch decisions. Timestamps are monotonic-clock nanoseconds rather
/// than `Instant`, since they are written by the child across a process
/// boundary (see `os::time_sink`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTimeRecord {
    pub pid: Option<nix::unistd::Pid>,
    pub started_at_nanos: Option<u64>,
    pub ended_at_nanos: Option<u64>,
}

impl ProcessTimeRecord {
    pub fn duration(&self) -> Option<std::time::Duration> {
        match (self.started_at_nanos, self.ended_at_nanos) {
            (Some(s), Some(e)) => Some(std::time::Duration::from_nanos(e.saturating_sub(s))),
            _ => None,
        }
    }
}

/// The single owner of all [`ProcessEntry`] values for one run.
#[derive(Debug, Clone)]
pub struct Workload {
    pub policy: Policy,
    pub entries: Vec<ProcessEntry>,
    pub records: Vec<ProcessTimeRecord>,
}

impl Workload {
    pub fn new(policy: Policy, entries: Vec<ProcessEntry>) -> Self {
        let records = entries
            .iter()
            .map(|_| ProcessTimeRecord::default())
            .collect();
        Self {
            policy,
            entries,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
