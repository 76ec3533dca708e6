//! Signal discipline: SIGALRM and SIGCHLD are blocked at process level
//! except during the signal-wait, which atomically unblocks them, waits
//! for one, and re-blocks. The handler performs a single relaxed store and
//! nothing else; any richer design (queueing, logging) would break
//! async-signal-safety.

use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{SchedResult, SchedulerError};

pub const EVENT_NONE: u8 = 0;
pub const EVENT_TIMER: u8 = 1;
pub const EVENT_CHILD: u8 = 2;

/// Handler-to-mainline communication is this flag alone.
static EVENT_FLAG: AtomicU8 = AtomicU8::new(EVENT_NONE);

extern "C" fn on_signal(signo: libc::c_int) {
    let value = if signo == libc::SIGCHLD {
        EVENT_CHILD
    } else {
        EVENT_TIMER
    };
    EVENT_FLAG.store(value, Ordering::Relaxed);
}

/// Installs `on_signal` for SIGALRM and SIGCHLD.
///
/// SAFETY: `sigaction` is FFI; the handler it installs touches only a
/// single `AtomicU8`, which is async-signal-safe.
pub fn install_handlers() -> SchedResult<()> {
    unsafe {
        let mut act: libc::sigaction = std::mem::zeroed();
        act.sa_sigaction = on_signal as usize;
        // SA_NOCLDSTOP: suspending a child with SIGSTOP must not itself
        // look like a ChildTerminated event.
        act.sa_flags = libc::SA_NOCLDSTOP;
        libc::sigemptyset(&mut act.sa_mask);

        for signo in [libc::SIGALRM, libc::SIGCHLD] {
            if libc::sigaction(signo, &act, std::ptr::null_mut()) != 0 {
                return Err(SchedulerError::Setup(format!(
                    "sigaction({signo}) failed: {}",
                    std::io::Error::last_os_error()
                )));
            }
        }
    }
    Ok(())
}

/// An opaque saved signal mask, used only to restore the mask across
/// `sigsuspend`.
#[derive(Debug, Clone, Copy)]
pub struct SavedMask(libc::sigset_t);

/// Blocks SIGALRM and SIGCHLD at process level, returning the prior mask.
///
/// SAFETY: `sigprocmask` is FFI; `block` and `old` are stack-local and
/// fully initialized before use.
pub fn block_scheduling_signals() -> SchedResult<SavedMask> {
    unsafe {
        let mut block: libc::sigset_t = std::mem::zeroed();
        libc::sigemptyset(&mut block);
        libc::sigaddset(&mut block, libc::SIGALRM);
        libc::sigaddset(&mut block, libc::SIGCHLD);

        let mut old = MaybeUninit::<libc::sigset_t>::zeroed();
        if libc::sigprocmask(libc::SIG_BLOCK, &block, old.as_mut_ptr()) != 0 {
            return Err(SchedulerError::Setup(format!(
                "sigprocmask failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(SavedMask(old.assume_init()))
    }
}

/// Atomically restores `mask`, blocks until a signal is delivered while the
/// mask permits it, and re-blocks on return. Reads and clears the handler's
/// flag. This is the only point at which the parent suspends.
///
/// SAFETY: `sigsuspend` is FFI; always returns `-1`/`EINTR` by definition,
/// which is the expected, non-error outcome here.
pub fn wait_for_event(mask: &SavedMask) -> u8 {
    unsafe {
        libc::sigsuspend(&mask.0);
    }
    EVENT_FLAG.swap(EVENT_NONE, Ordering::Relaxed)
}

/// Raises SIGALRM against this process; used only to synthesize the
/// zero-gap startup event.
pub fn raise_alarm() {
    unsafe {
        libc::raise(libc::SIGALRM);
    }
}
