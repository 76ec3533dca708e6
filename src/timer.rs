//! Dual-Deadline Timer: two logical countdowns simulated over one
//! physical one-shot timer.

use std::time::Duration;

/// The quantum, in time units.
pub const RR_TIMES_OF_UNIT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ProcessArrival,
    TimesliceOver,
}

/// `arrival_remaining` is `Some` only while the `ArrivalQueue` is
/// non-empty; `timeslice_remaining` is `Some` only under RR while the
/// `ReadySet` is non-empty. Modeling validity as `Option` rather than a
/// separate boolean keeps "no applicable deadline" unrepresentable as a
/// stale duration.
#[derive(Debug, Clone)]
pub struct DualDeadlineTimer {
    time_unit: Duration,
    arrival_remaining: Option<Duration>,
    timeslice_remaining: Option<Duration>,
}

impl DualDeadlineTimer {
    pub fn new(time_unit: Duration) -> Self {
        Self {
            time_unit,
            arrival_remaining: None,
            timeslice_remaining: None,
        }
    }

    pub fn reload_arrival(&mut self, gap_units: u64) {
        self.arrival_remaining = Some(self.time_unit.saturating_mul(gap_units as u32));
    }

    pub fn clear_arrival(&mut self) {
        self.arrival_remaining = None;
    }

    pub fn reload_timeslice(&mut self) {
        self.timeslice_remaining = Some(self.time_unit.saturating_mul(RR_TIMES_OF_UNIT));
    }

    pub fn clear_timeslice(&mut self) {
        self.timeslice_remaining = None;
    }

    pub fn arrival_remaining(&self) -> Option<Duration> {
        self.arrival_remaining
    }

    pub fn timeslice_remaining(&self) -> Option<Duration> {
        self.timeslice_remaining
    }

    /// The physical one-shot value, or `None` when neither deadline
    /// applies (the caller is about to terminate).
    pub fn arm(&self) -> Option<Duration> {
        match (self.arrival_remaining, self.timeslice_remaining) {
            (Some(a), Some(t)) => Some(a.min(t)),
            (Some(a), None) => Some(a),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }

    /// Which logical deadline the physical timer's firing corresponds to.
    pub fn classify_fire(&self) -> EventKind {
        match (self.arrival_remaining, self.timeslice_remaining) {
            (Some(a), Some(t)) => {
                if a <= t {
                    EventKind::ProcessArrival
                } else {
                    EventKind::TimesliceOver
                }
            }
            (Some(_), None) => EventKind::ProcessArrival,
            (None, Some(_)) => EventKind::TimesliceOver,
            (None, None) => panic!("classify_fire called with no applicable deadline"),
        }
    }

    /// Subtracts the fired deadline's elapsed value from the *other*
    /// deadline and zeros the fired one. This is the only mechanism that
    /// keeps the unfired countdown accurate across firings, and must not
    /// be simplified into restarting both deadlines on every fire.
    pub fn debit(&mut self, fired: EventKind) {
        match fired {
            EventKind::ProcessArrival => {
                let elapsed = self.arrival_remaining.unwrap_or_default();
                if let Some(t) = self.timeslice_remaining.as_mut() {
                    *t = t.saturating_sub(elapsed);
                }
                self.arrival_remaining = Some(Duration::ZERO);
            }
            EventKind::TimesliceOver => {
                let elapsed = self.timeslice_remaining.unwrap_or_default();
                if let Some(a) = self.arrival_remaining.as_mut() {
                    *a = a.saturating_sub(elapsed);
                }
                self.timeslice_remaining = Some(Duration::ZERO);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_picks_the_lesser_applicable_deadline() {
        let mut t = DualDeadlineTimer::new(Duration::from_millis(1));
        t.reload_arrival(10);
        t.reload_timeslice();
        assert_eq!(t.arm(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn classify_and_debit_preserve_the_unfired_deadline() {
        let mut t = DualDeadlineTimer::new(Duration::from_millis(1));
        t.reload_arrival(10);
        t.reload_timeslice(); // 500ms
        assert_eq!(t.classify_fire(), EventKind::ProcessArrival);
        t.debit(EventKind::ProcessArrival);
        // timeslice had 500ms, 10ms elapsed -> 490ms remains untouched by reload
        assert_eq!(t.timeslice_remaining(), Some(Duration::from_millis(490)));
        assert_eq!(t.arrival_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn only_applicable_deadlines_participate() {
        let mut t = DualDeadlineTimer::new(Duration::from_millis(1));
        t.reload_arrival(5);
        assert_eq!(t.arm(), Some(Duration::from_millis(5)));
        assert_eq!(t.classify_fire(), EventKind::ProcessArrival);
    }

    #[test]
    fn no_deadline_means_nothing_to_arm() {
        let t = DualDeadlineTimer::new(Duration::from_millis(1));
        assert_eq!(t.arm(), None);
    }
}
