//! The one physical one-shot interval timer that the Dual-Deadline Timer
//! simulates two logical countdowns over. `nix` has no
//! `timer_create`/`timer_settime` wrapper, so this is raw `libc`, same
//! rationale as `os::priority`.

use std::time::Duration;

use crate::error::{SchedResult, SchedulerError};

pub struct PosixTimer(libc::timer_t);

impl PosixTimer {
    /// Creates a `CLOCK_MONOTONIC` timer that delivers `SIGALRM` on expiry.
    /// `install_handlers` must have already registered the SIGALRM handler.
    ///
    /// SAFETY: `sev` is fully initialized before being passed to
    /// `timer_create`; `timer_id` is only read after a successful call.
    pub fn create() -> SchedResult<Self> {
        unsafe {
            let mut sev: libc::sigevent = std::mem::zeroed();
            sev.sigev_notify = libc::SIGEV_SIGNAL;
            sev.sigev_signo = libc::SIGALRM;

            let mut timer_id: libc::timer_t = std::ptr::null_mut();
            if libc::timer_create(libc::CLOCK_MONOTONIC, &mut sev, &mut timer_id) != 0 {
                return Err(SchedulerError::Setup(format!(
                    "timer_create failed: {}",
                    std::io::Error::last_os_error()
                )));
            }
            Ok(Self(timer_id))
        }
    }

    /// Arms (or, if `duration` is zero, disarms) the timer as a one-shot.
    /// A zero duration is only ever passed at startup, where the caller is
    /// expected to have already raised a synthetic `SIGALRM` itself; POSIX
    /// disarms rather than immediately firing on a zero `it_value`.
    ///
    /// SAFETY: `its` is fully initialized before use; `self.0` is a valid
    /// timer created by [`Self::create`].
    pub fn arm(&self, duration: Duration) -> SchedResult<()> {
        unsafe {
            let its = libc::itimerspec {
                it_interval: libc::timespec {
                    tv_sec: 0,
                    tv_nsec: 0,
                },
                it_value: libc::timespec {
                    tv_sec: duration.as_secs() as i64,
                    tv_nsec: duration.subsec_nanos() as i64,
                },
            };
            if libc::timer_settime(self.0, 0, &its, std::ptr::null_mut()) != 0 {
                return Err(SchedulerError::Setup(format!(
                    "timer_settime failed: {}",
                    std::io::Error::last_os_error()
                )));
            }
        }
        Ok(())
    }
}

impl Drop for PosixTimer {
    fn drop(&mut self) {
        // SAFETY: `self.0` is a valid timer created by `timer_create` and
        // not yet deleted.
        unsafe {
            libc::timer_delete(self.0);
        }
    }
}
