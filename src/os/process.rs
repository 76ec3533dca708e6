//! Process lifecycle primitives: fork a child that runs `run_single_unit`
//! `burst_length` times, suspend/resume via `SIGSTOP`/`SIGCONT`, and
//! non-blocking reap. Grounded in the `nix::unistd::fork`/
//! `nix::sys::wait::waitpid` idiom used by the Polkadot PVF prepare-worker
//! for real fork-based process sandboxing.

use nix::sys::signal::{self, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};

use super::priority::{self, PriorityLevel};
use super::time_sink::TimeRecordingSink;
use super::unit_of_work::run_single_unit;
use crate::error::{SchedResult, SchedulerError};

/// Forks a child that immediately pins itself one priority level below the
/// parent, runs its measured burst, and exits. The parent gets back the
/// child's pid; it is the parent's responsibility to suspend it right away
/// as part of admitting it.
pub fn fork_child(index: usize, burst_length: u64, sink: &TimeRecordingSink) -> SchedResult<Pid> {
    // SAFETY: the scheduler is single-threaded up to this point, which is
    // the precondition `fork` in a multi-threaded Rust process would
    // otherwise violate (async-signal-unsafe allocator state).
    match unsafe { fork() }.map_err(SchedulerError::Os)? {
        ForkResult::Child => {
            if let Err(e) = priority::pin(nix::unistd::getpid(), PriorityLevel::ParentMaxMinusOne) {
                match e {
                    SchedulerError::Privilege(msg) => {
                        tracing::warn!(%msg, "child running without elevated priority");
                    }
                    other => tracing::error!(error = %other, "failed to pin child priority"),
                }
            }
            sink.record_start(index);
            for _ in 0..burst_length {
                run_single_unit();
            }
            sink.record_end(index);
            std::process::exit(0);
        }
        ForkResult::Parent { child } => Ok(child),
    }
}

/// `SIGSTOP`s `pid`. Never fails under normal operation; a failure here
/// means the child is already gone, which should not be reachable by
/// construction.
pub fn suspend(pid: Pid) -> SchedResult<()> {
    signal::kill(pid, Signal::SIGSTOP).map_err(SchedulerError::Os)
}

/// `SIGCONT`s `pid`.
pub fn resume(pid: Pid) -> SchedResult<()> {
    signal::kill(pid, Signal::SIGCONT).map_err(SchedulerError::Os)
}

/// Non-blocking reap of any terminated child. Returns `None` if nothing
/// was reapable, including the "no children left" case, which is not an
/// error here. A child reaped via `WaitStatus::Signaled` did not exit
/// voluntarily after its burst, which should not happen by construction;
/// that case is reported as a distinct, fatal error rather than folded
/// into the ordinary termination path.
pub fn reap_nonblocking() -> SchedResult<Option<Pid>> {
    match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::Exited(pid, _)) => Ok(Some(pid)),
        Ok(WaitStatus::Signaled(pid, sig, _)) => Err(SchedulerError::ChildSignaled(format!(
            "pid {pid} terminated by signal {sig:?} instead of exiting voluntarily"
        ))),
        Ok(_) => Ok(None),
        Err(nix::errno::Errno::ECHILD) => Ok(None),
        Err(e) => Err(SchedulerError::Os(e)),
    }
}
