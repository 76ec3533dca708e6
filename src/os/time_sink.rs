//! Time-recording sink: an opaque collaborator that brackets a child's
//! start-of-work and end-of-work moments. The core only ever passes a
//! `ProcessTimeRecord`-equivalent through; it never interprets the
//! contents.
//!
//! Children are separate OS processes, so the sink needs its own channel
//! back to the parent: one `MAP_SHARED` anonymous mapping, one fixed-size
//! slot per workload entry, written with a single relaxed store from
//! inside the child and read by the parent only after the child has been
//! reaped.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{SchedResult, SchedulerError};

#[repr(C)]
struct Slot {
    started_at_nanos: AtomicU64,
    ended_at_nanos: AtomicU64,
}

/// A `MAP_SHARED` array of [`Slot`]s, one per workload entry, mapped into
/// both the parent and every forked child.
pub struct TimeRecordingSink {
    ptr: *mut Slot,
    len: usize,
}

// SAFETY: every slot is written by at most one process (the child that
// owns it) and read by the parent only after that child has terminated and
// been reaped, so there is no concurrent access to a single slot.
unsafe impl Send for TimeRecordingSink {}
unsafe impl Sync for TimeRecordingSink {}

impl TimeRecordingSink {
    pub fn new(len: usize) -> SchedResult<Self> {
        let byte_len = len.max(1) * std::mem::size_of::<Slot>();
        // SAFETY: `mmap` with MAP_SHARED | MAP_ANONYMOUS returns memory
        // that survives `fork`, making it visible to every child; the
        // length is non-zero and the flags request no backing file.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                byte_len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(SchedulerError::Setup(format!(
                "mmap for time-recording sink failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        // SAFETY: the mapping is freshly zeroed by the kernel; AtomicU64
        // has the same representation as u64, so zero-initialization is valid.
        Ok(Self {
            ptr: ptr as *mut Slot,
            len,
        })
    }

    fn slot(&self, index: usize) -> &Slot {
        assert!(index < self.len, "time-recording sink index out of range");
        // SAFETY: `index < self.len` was just checked, and `ptr` is valid
        // for `self.len` slots for the lifetime of this mapping.
        unsafe { &*self.ptr.add(index) }
    }

    /// Called only inside a child, immediately before it begins its burst.
    pub fn record_start(&self, index: usize) {
        self.slot(index)
            .started_at_nanos
            .store(monotonic_nanos(), Ordering::Relaxed);
    }

    /// Called only inside a child, immediately after its burst completes.
    pub fn record_end(&self, index: usize) {
        self.slot(index)
            .ended_at_nanos
            .store(monotonic_nanos(), Ordering::Relaxed);
    }

    /// Read back after the child has been reaped. Returns `(0, 0)` if the
    /// child never reached its work loop (e.g. it was killed before start).
    pub fn read(&self, index: usize) -> (u64, u64) {
        let slot = self.slot(index);
        (
            slot.started_at_nanos.load(Ordering::Relaxed),
            slot.ended_at_nanos.load(Ordering::Relaxed),
        )
    }
}

impl Drop for TimeRecordingSink {
    fn drop(&mut self) {
        let byte_len = self.len.max(1) * std::mem::size_of::<Slot>();
        // SAFETY: `self.ptr` was returned by a matching `mmap` of the same length.
        unsafe {
            libc::munmap(self.ptr as *mut libc::c_void, byte_len);
        }
    }
}

fn monotonic_nanos() -> u64 {
    // SAFETY: `ts` is fully initialized by `clock_gettime` before use.
    unsafe {
        let mut ts: libc::timespec = std::mem::zeroed();
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
        ts.tv_sec as u64 * 1_000_000_000 + ts.tv_nsec as u64
    }
}
