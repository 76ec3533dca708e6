//! User-space process scheduler simulator: drives a fixed workload of
//! CPU-bound child processes under FIFO, Round-Robin, SJF, or PSJF,
//! using real `fork`/`SIGSTOP`/`SIGCONT`/one-shot timers as the dispatch
//! mechanism instead of time-slicing inside one process.

pub mod arrival;
pub mod calibrator;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod model;
pub mod os;
pub mod ready_set;
pub mod report;
pub mod timer;
pub mod workload;

pub use error::{SchedResult, SchedulerError};
pub use event_loop::Scheduler;
