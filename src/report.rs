//! Output formatting: the mandatory `name pid` lines, with an additive
//! `--verbose` form carrying the timing columns the time-recording sink
//! captured.

use std::fmt;

use crate::model::{ProcessEntry, ProcessTimeRecord};

#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub name: String,
    pub pid: Option<nix::unistd::Pid>,
    pub started_at_nanos: Option<u64>,
    pub ended_at_nanos: Option<u64>,
}

impl ProcessReport {
    pub fn new(entry: &ProcessEntry, record: &ProcessTimeRecord) -> Self {
        Self {
            name: entry.name.clone(),
            pid: entry.os_pid,
            started_at_nanos: record.started_at_nanos,
            ended_at_nanos: record.ended_at_nanos,
        }
    }

    /// The mandatory `name pid` line.
    pub fn summary_line(&self) -> String {
        match self.pid {
            Some(pid) => format!("{} {}", self.name, pid),
            None => format!("{} -", self.name),
        }
    }

    /// Additive timing columns appended only under `--verbose`.
    pub fn verbose_suffix(&self) -> String {
        match (self.started_at_nanos, self.ended_at_nanos) {
            (Some(s), Some(e)) => format!(" start={s}ns end={e}ns dur={}ns", e.saturating_sub(s)),
            _ => " start=? end=?".to_string(),
        }
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}

/// Renders the full report, `name pid` per line in input order, with
/// timing columns appended when `verbose` is set.
pub fn render(reports: &[ProcessReport], verbose: bool) -> String {
    let mut out = String::new();
    for r in reports {
        out.push_str(&r.summary_line());
        if verbose {
            out.push_str(&r.verbose_suffix());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProcessEntry;

    #[test]
    fn summary_line_is_name_then_pid() {
        let mut e = ProcessEntry::new("A".into(), 0, 3);
        e.os_pid = Some(nix::unistd::Pid::from_raw(1234));
        let r = ProcessReport::new(&e, &ProcessTimeRecord::default());
        assert_eq!(r.summary_line(), "A 1234");
    }

    #[test]
    fn render_in_order_without_verbose_has_no_timing_columns() {
        let e = ProcessEntry::new("A".into(), 0, 3);
        let r = ProcessReport::new(&e, &ProcessTimeRecord::default());
        let out = render(&[r], false);
        assert_eq!(out, "A -\n");
    }

    #[test]
    fn verbose_adds_timing_columns_when_available() {
        let e = ProcessEntry::new("A".into(), 0, 3);
        let record = ProcessTimeRecord {
            pid: None,
            started_at_nanos: Some(100),
            ended_at_nanos: Some(350),
        };
        let r = ProcessReport::new(&e, &record);
        let out = render(&[r], true);
        assert!(out.contains("dur=250ns"));
    }
}
