//! OS collaborator layer: every place this crate talks to the kernel
//! directly. Each submodule wraps one family of primitives the scheduling
//! core treats as opaque.

pub mod posix_timer;
pub mod priority;
pub mod process;
pub mod signals;
pub mod time_sink;
pub mod unit_of_work;

pub use posix_timer::PosixTimer;
pub use priority::PriorityLevel;
pub use time_sink::TimeRecordingSink;
pub use unit_of_work::run_single_unit;
