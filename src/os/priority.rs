//! Priority Pinner: pins a process to `SCHED_FIFO` at either the highest
//! real-time priority or one level below. There is no safe abstraction for
//! `sched_setscheduler` in `nix` that covers every target this crate
//! supports, so this stays raw `libc`, documented `unsafe` FFI rather than
//! a leaky hand-rolled safe wrapper.

use crate::error::{SchedResult, SchedulerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    /// The highest `SCHED_FIFO` priority available on this machine.
    ParentMax,
    /// One level below `ParentMax`.
    ParentMaxMinusOne,
}

/// Pins `pid` (0 meaning "the calling process") to `SCHED_FIFO` at `level`.
///
/// SAFETY: `sched_get_priority_max`/`sched_setscheduler` are FFI calls with
/// no side effects beyond the kernel's own scheduling tables; `param` is
/// fully initialized before use.
pub fn pin(pid: nix::unistd::Pid, level: PriorityLevel) -> SchedResult<()> {
    unsafe {
        let max = libc::sched_get_priority_max(libc::SCHED_FIFO);
        if max == -1 {
            return Err(SchedulerError::Setup(format!(
                "sched_get_priority_max failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        let priority = match level {
            PriorityLevel::ParentMax => max,
            PriorityLevel::ParentMaxMinusOne => max - 1,
        };
        let param = libc::sched_param {
            sched_priority: priority,
        };
        if libc::sched_setscheduler(pid.as_raw(), libc::SCHED_FIFO, &param) == -1 {
            let err = std::io::Error::last_os_error();
            return Err(match err.raw_os_error() {
                Some(libc::EPERM) => {
                    SchedulerError::Privilege(format!("sched_setscheduler: {err}"))
                }
                _ => SchedulerError::Setup(format!("sched_setscheduler: {err}")),
            });
        }
    }
    Ok(())
}
