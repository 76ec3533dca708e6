//! Integration tests driving representative scheduling scenarios through
//! real `fork`/`SIGSTOP`/`SIGCONT`/timers. Runs without root: a missing
//! `SCHED_FIFO` privilege degrades priority pinning but is not fatal, so
//! these still exercise the full event loop end to end.
//!
//! A short, fixed time unit keeps the whole suite fast instead of paying
//! the real calibrator's measured duration.

use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

use sched_sim::{workload, Scheduler};

const FAST_UNIT: Duration = Duration::from_micros(200);

/// The event loop installs process-global signal handlers and reaps any
/// child of the test binary, so two schedulers must never run
/// concurrently within this process even though the test runner uses one
/// thread per test.
static SERIAL: Mutex<()> = Mutex::new(());

fn run(input: &str) -> Vec<String> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let loaded = workload::load(Cursor::new(input)).expect("workload parses");
    let mut scheduler = Scheduler::new(loaded, FAST_UNIT).expect("scheduler sets up");
    let reports = scheduler.run().expect("scheduler runs to completion");
    reports.into_iter().map(|r| r.name).collect()
}

#[test]
#[cfg(unix)]
fn fifo_two_processes_complete_in_admission_order() {
    let names = run("FIFO\n2\nA 0 3\nB 0 2\n");
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
#[cfg(unix)]
fn zero_entries_exits_immediately() {
    let names = run("RR\n0\n");
    assert!(names.is_empty());
}

#[test]
#[cfg(unix)]
fn single_entry_at_offset_zero_runs_uninterrupted() {
    let names = run("SJF\n1\nA 0 5\n");
    assert_eq!(names, vec!["A"]);
}

#[test]
#[cfg(unix)]
fn zero_gap_burst_admits_all_three_before_any_runs() {
    let names = run("FIFO\n3\nA 0 1\nB 0 1\nC 0 1\n");
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
#[cfg(unix)]
fn sjf_picks_shortest_remaining_after_each_completion() {
    // A(5) alone at t=0; B(2) and C(1) arrive later. A runs to completion
    // uninterrupted, then the shortest of the remainder goes next.
    let names = run("SJF\n3\nA 0 5\nB 1 2\nC 2 1\n");
    assert_eq!(names[0], "A");
}

#[test]
#[cfg(unix)]
fn round_robin_admits_every_entry() {
    let names = run("RR\n2\nA 0 4\nB 0 4\n");
    let mut sorted = names;
    sorted.sort();
    assert_eq!(sorted, vec!["A", "B"]);
}

#[test]
#[cfg(unix)]
fn psjf_admits_every_entry_despite_preemption() {
    let names = run("PSJF\n3\nA 0 5\nB 1 2\nC 2 1\n");
    let mut sorted = names;
    sorted.sort();
    assert_eq!(sorted, vec!["A", "B", "C"]);
}

#[test]
#[cfg(unix)]
fn malformed_workload_is_rejected_before_any_process_is_forked() {
    let err = workload::load(Cursor::new("NOPE\n0\n")).unwrap_err();
    assert!(matches!(err, sched_sim::SchedulerError::Workload(_)));
}
