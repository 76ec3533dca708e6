//! The Event Loop: the loop body that ties the Arrival Queue, Ready-Set
//! Strategy, and Dual-Deadline Timer to the OS collaborator layer.

use crate::arrival::ArrivalQueue;
use crate::error::{SchedResult, SchedulerError};
use crate::model::{EntryId, Policy, Status, Workload};
use crate::os::{priority, process, signals, PosixTimer, PriorityLevel, TimeRecordingSink};
use crate::ready_set::{ReadySet, ReadySetStrategy};
use crate::report::ProcessReport;
use crate::timer::{DualDeadlineTimer, EventKind};

pub struct Scheduler {
    workload: Workload,
    arrivals: ArrivalQueue,
    ready_set: ReadySet,
    timer_state: DualDeadlineTimer,
    sink: TimeRecordingSink,
    physical_timer: PosixTimer,
}

impl Scheduler {
    pub fn new(workload: Workload, time_unit: std::time::Duration) -> SchedResult<Self> {
        let arrivals = ArrivalQueue::new(&workload.entries);
        let ready_set = ReadySet::new(workload.policy);
        let timer_state = DualDeadlineTimer::new(time_unit);
        let sink = TimeRecordingSink::new(workload.len().max(1))?;

        // The parent must run at a strictly higher real-time priority than
        // any child so the kernel never preempts it while it is runnable;
        // missing privilege degrades this but is not fatal.
        if let Err(e) = priority::pin(nix::unistd::getpid(), PriorityLevel::ParentMax) {
            match e {
                SchedulerError::Privilege(msg) => {
                    tracing::warn!(%msg, "running without elevated parent priority");
                }
                other => tracing::error!(error = %other, "failed to pin parent priority"),
            }
        }

        signals::install_handlers()?;
        let physical_timer = PosixTimer::create()?;
        Ok(Self {
            workload,
            arrivals,
            ready_set,
            timer_state,
            sink,
            physical_timer,
        })
    }

    /// Runs the loop to completion and returns the per-entry report, in
    /// input order, for the CLI front-end to print.
    pub fn run(&mut self) -> SchedResult<Vec<ProcessReport>> {
        tracing::info!(n = self.workload.len(), policy = %self.workload.policy, "scheduler starting");

        if self.workload.is_empty() {
            tracing::info!("empty workload, nothing to schedule");
            return Ok(Vec::new());
        }

        let mask = signals::block_scheduling_signals()?;

        let first_gap = self.arrivals.peek_gap(&self.workload.entries);
        self.timer_state.reload_arrival(first_gap);
        if first_gap == 0 {
            // Inject a synthetic fire so the zero-gap drain runs on the
            // very first iteration.
            signals::raise_alarm();
        }
        self.physical_timer
            .arm(self.timer_state.arm().unwrap_or_default())?;

        loop {
            match signals::wait_for_event(&mask) {
                signals::EVENT_CHILD => self.handle_child_terminated()?,
                signals::EVENT_TIMER => match self.timer_state.classify_fire() {
                    EventKind::ProcessArrival => self.handle_process_arrival()?,
                    EventKind::TimesliceOver => self.handle_timeslice_over(),
                },
                _ => continue,
            }

            if self.arrivals.is_empty() && self.ready_set.is_empty() {
                break;
            }

            self.context_switch()?;
        }

        tracing::info!("scheduler finished");
        Ok(self.reports())
    }

    fn handle_process_arrival(&mut self) -> SchedResult<()> {
        self.timer_state.debit(EventKind::ProcessArrival);

        let first = self.arrivals.pop(&self.workload.entries);
        self.add_process(first)?;

        let mut gap = (!self.arrivals.is_empty())
            .then(|| self.arrivals.peek_gap(&self.workload.entries));
        while gap == Some(0) {
            let id = self.arrivals.pop(&self.workload.entries);
            self.add_process(id)?;
            gap = (!self.arrivals.is_empty())
                .then(|| self.arrivals.peek_gap(&self.workload.entries));
        }

        match gap {
            Some(g) => self.timer_state.reload_arrival(g),
            None => self.timer_state.clear_arrival(),
        }
        Ok(())
    }

    fn handle_timeslice_over(&mut self) {
        self.timer_state.debit(EventKind::TimesliceOver);
        self.ready_set.timeslice_over();
        self.timer_state.reload_timeslice();
    }

    fn handle_child_terminated(&mut self) -> SchedResult<()> {
        if process::reap_nonblocking()?.is_some() {
            // Exactly one child can be Running at a time, so the reaped
            // child is whichever entry the ready set currently designates
            // as current.
            if let Some(id) = self.ready_set.current() {
                self.record_termination(id);
                self.ready_set.remove_current(&self.workload.entries);
                self.sync_rr_timeslice();
            }
        }
        Ok(())
    }

    fn add_process(&mut self, id: EntryId) -> SchedResult<()> {
        let burst = self.workload.entries[id].burst_length;
        let pid = process::fork_child(id, burst, &self.sink)?;
        process::suspend(pid)?;

        self.workload.entries[id].os_pid = Some(pid);
        self.workload.entries[id].status = Status::Ready;
        self.workload.records[id].pid = Some(pid);
        tracing::info!(name = %self.workload.entries[id].name, pid = %pid, "admitted");

        self.ready_set.add(id, &self.workload.entries);
        self.sync_rr_timeslice();
        Ok(())
    }

    fn record_termination(&mut self, id: EntryId) {
        self.workload.entries[id].status = Status::Terminated;
        let (started, ended) = self.sink.read(id);
        if started != 0 {
            self.workload.records[id].started_at_nanos = Some(started);
        }
        if ended != 0 {
            self.workload.records[id].ended_at_nanos = Some(ended);
        }
        tracing::info!(name = %self.workload.entries[id].name, "terminated");
    }

    /// Tracks the moment ReadySet transitions empty<->non-empty under RR,
    /// which is where `timeslice_remaining`'s validity is pinned.
    fn sync_rr_timeslice(&mut self) {
        if self.workload.policy != Policy::RoundRobin {
            return;
        }
        if self.ready_set.is_empty() {
            self.timer_state.clear_timeslice();
        } else if self.timer_state.timeslice_remaining().is_none() {
            self.timer_state.reload_timeslice();
        }
    }

    fn context_switch(&mut self) -> SchedResult<()> {
        let plan = self.ready_set.context_switch_plan();

        if let Some(id) = plan.suspend {
            if let Some(pid) = self.workload.entries[id].os_pid {
                process::suspend(pid)?;
                self.workload.entries[id].status = Status::Ready;
            }
        }
        if let Some(id) = plan.resume {
            if let Some(pid) = self.workload.entries[id].os_pid {
                process::resume(pid)?;
                self.workload.entries[id].status = Status::Running;
            }
        }

        if let Some(duration) = self.timer_state.arm() {
            self.physical_timer.arm(duration)?;
        }
        Ok(())
    }

    fn reports(&self) -> Vec<ProcessReport> {
        self.workload
            .entries
            .iter()
            .zip(self.workload.records.iter())
            .map(|(entry, record)| ProcessReport::new(entry, record))
            .collect()
    }
}
