//! CLI surface: the flags the front-end accepts.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sched-sim", about = "User-space process scheduler simulator")]
pub struct AppConfig {
    /// Workload description file; reads from stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Overrides `RUST_LOG` for this run (e.g. "info", "debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Overrides the calibrator's repetition count `R` (default 1000).
    #[arg(long)]
    pub unit_repeats: Option<u32>,

    /// Appends per-process start/end timing columns to the output.
    #[arg(long, short)]
    pub verbose: bool,
}

impl AppConfig {
    pub fn unit_repeats(&self) -> u32 {
        self.unit_repeats
            .unwrap_or(crate::calibrator::DEFAULT_REPETITIONS)
    }
}
