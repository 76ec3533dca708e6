//! CLI front-end: parses flags, wires up logging, loads the workload, runs
//! the scheduler, prints the report, and translates any `SchedulerError`
//! into a process exit code.

use std::io::{BufReader, IsTerminal};

use clap::Parser;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing_subscriber::EnvFilter;

use sched_sim::config::AppConfig;
use sched_sim::{calibrator, report, workload, SchedResult, Scheduler, SchedulerError};

fn main() {
    let config = AppConfig::parse();
    init_tracing(&config);

    if std::io::stdin().is_terminal() && config.input.is_none() {
        tracing::warn!("reading workload from an interactive terminal; pipe a file or pass --input");
    }

    match run(&config) {
        Ok(output) => {
            print!("{output}");
        }
        Err(err) => {
            tracing::error!(error = %err, "scheduler failed");
            eprintln!("sched-sim: {err}");
            if matches!(
                err,
                SchedulerError::Setup(_) | SchedulerError::Os(_) | SchedulerError::ChildSignaled(_)
            ) {
                teardown_process_group();
            }
            std::process::exit(err.exit_code());
        }
    }
}

/// Kills every process in this process's group so a fork/timer failure
/// mid-run can't leave already-admitted children orphaned in a
/// permanently-`SIGSTOP`'d state. Best-effort: a failure here must not mask
/// the original error or abort the exit.
fn teardown_process_group() {
    if let Err(e) = signal::kill(Pid::from_raw(0), Signal::SIGINT) {
        tracing::warn!(error = %e, "failed to tear down process group");
    }
}

fn run(config: &AppConfig) -> SchedResult<String> {
    let loaded = load_workload(config)?;

    let time_unit = calibrator::calibrate(config.unit_repeats());
    let mut scheduler = Scheduler::new(loaded, time_unit)?;
    let reports = scheduler.run()?;

    Ok(report::render(&reports, config.verbose))
}

fn load_workload(config: &AppConfig) -> SchedResult<sched_sim::model::Workload> {
    match &config.input {
        Some(path) => {
            let file = std::fs::File::open(path).map_err(SchedulerError::Io)?;
            workload::load(BufReader::new(file))
        }
        None => workload::load(std::io::stdin().lock()),
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = match &config.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
