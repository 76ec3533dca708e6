//! Error taxonomy for the scheduler and everything around it.

use thiserror::Error;

pub type SchedResult<T> = Result<T, SchedulerError>;

/// Typed in place of the C-style `assert`/`perror`/`exit` a scheduler like
/// this would traditionally use.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Timer creation/arming, fork failure: fatal, tears the process group down.
    #[error("setup failed: {0}")]
    Setup(String),

    /// Unknown policy token, missing/malformed fields: fatal, reported as
    /// an assertion in the source this is distilled from.
    #[error("malformed workload: {0}")]
    Workload(String),

    /// A required OS primitive returned an error.
    #[error("OS primitive failed: {0}")]
    Os(#[from] nix::errno::Errno),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reaped child exited via a signal rather than voluntarily after
    /// its burst. Children only ever exit voluntarily by construction, so
    /// this is treated as fatal rather than folded into the ordinary
    /// termination path.
    #[error("child terminated unexpectedly: {0}")]
    ChildSignaled(String),

    /// Surfaced by the priority-pinning collaborator. Non-fatal: the run
    /// continues degraded rather than aborting.
    #[error("insufficient privilege to pin real-time priority: {0}")]
    Privilege(String),
}

impl SchedulerError {
    /// Exit code mapping: 0 only on normal completion, non-zero signals a
    /// setup failure. `Privilege` is handled by the caller before it ever
    /// reaches an exit path.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchedulerError::Setup(_) => 1,
            SchedulerError::Workload(_) => 2,
            SchedulerError::Os(_) => 3,
            SchedulerError::Io(_) => 3,
            SchedulerError::ChildSignaled(_) => 4,
            SchedulerError::Privilege(_) => 0,
        }
    }
}
