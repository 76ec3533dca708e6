//! Time Unit Calibrator: the average wall-clock duration of one
//! `run_single_unit()` call on this machine.

use std::time::Duration;

use crate::os::run_single_unit;

/// Default repetition count `R`.
pub const DEFAULT_REPETITIONS: u32 = 1000;

/// Runs `run_single_unit` `repetitions` times back to back and returns the
/// mean duration. No failure path is defined for this.
pub fn calibrate(repetitions: u32) -> Duration {
    let reps = repetitions.max(1);
    let begin = std::time::Instant::now();
    for _ in 0..reps {
        run_single_unit();
    }
    let elapsed = begin.elapsed();
    let per_unit = elapsed / reps;
    tracing::debug!(?per_unit, reps, "calibrated time unit");
    per_unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrate_returns_a_positive_duration() {
        let d = calibrate(50);
        assert!(d.as_nanos() > 0);
    }

    #[test]
    fn zero_repetitions_is_treated_as_one() {
        let d = calibrate(0);
        assert!(d.as_nanos() > 0);
    }
}
