//! Workload loader: reads the textual workload description from any
//! `BufRead`, producing a [`Workload`]. Parsing and validation are kept
//! out of the scheduling core itself.

use std::io::BufRead;

use crate::error::{SchedResult, SchedulerError};
use crate::model::{Policy, ProcessEntry, Workload};

/// Reads `<POLICY>\n<N>\n<name> <arrival> <burst>\n` × N from `reader`.
pub fn load(reader: impl BufRead) -> SchedResult<Workload> {
    let mut lines = reader.lines();

    let policy_line = next_nonempty(&mut lines)?
        .ok_or_else(|| SchedulerError::Workload("missing policy line".into()))?;
    let policy = Policy::parse(policy_line.trim()).ok_or_else(|| {
        SchedulerError::Workload(format!("unknown policy token {policy_line:?}"))
    })?;

    let count_line = next_nonempty(&mut lines)?
        .ok_or_else(|| SchedulerError::Workload("missing entry count".into()))?;
    let count: usize = count_line.trim().parse().map_err(|_| {
        SchedulerError::Workload(format!("entry count is not an integer: {count_line:?}"))
    })?;

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let line = next_nonempty(&mut lines)?.ok_or_else(|| {
            SchedulerError::Workload(format!("expected {count} entries, found only {i}"))
        })?;
        entries.push(parse_entry(&line)?);
    }

    let mut seen = std::collections::HashSet::with_capacity(entries.len());
    for e in &entries {
        if !seen.insert(e.name.clone()) {
            return Err(SchedulerError::Workload(format!(
                "duplicate process name {:?}",
                e.name
            )));
        }
    }

    Ok(Workload::new(policy, entries))
}

fn parse_entry(line: &str) -> SchedResult<ProcessEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, arrival, burst] = fields.as_slice() else {
        return Err(SchedulerError::Workload(format!(
            "expected 3 whitespace-separated fields, got {:?}",
            line
        )));
    };
    let arrival_offset: u64 = arrival
        .parse()
        .map_err(|_| SchedulerError::Workload(format!("arrival is not a non-negative integer: {arrival:?}")))?;
    let burst_length: u64 = burst
        .parse()
        .map_err(|_| SchedulerError::Workload(format!("burst is not a non-negative integer: {burst:?}")))?;
    Ok(ProcessEntry::new(name.to_string(), arrival_offset, burst_length))
}

fn next_nonempty(
    lines: &mut std::io::Lines<impl BufRead>,
) -> SchedResult<Option<String>> {
    for line in lines {
        let line = line.map_err(SchedulerError::Io)?;
        if !line.trim().is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_a_well_formed_workload() {
        let input = "FIFO\n2\nA 0 3\nB 0 2\n";
        let w = load(Cursor::new(input)).unwrap();
        assert_eq!(w.policy, Policy::Fifo);
        assert_eq!(w.len(), 2);
        assert_eq!(w.entries[0].name, "A");
        assert_eq!(w.entries[1].burst_length, 2);
    }

    #[test]
    fn zero_entries_is_valid() {
        let input = "RR\n0\n";
        let w = load(Cursor::new(input)).unwrap();
        assert!(w.is_empty());
    }

    #[test]
    fn rejects_unknown_policy() {
        let input = "LOTTERY\n0\n";
        assert!(matches!(
            load(Cursor::new(input)),
            Err(SchedulerError::Workload(_))
        ));
    }

    #[test]
    fn rejects_malformed_entry_row() {
        let input = "SJF\n1\nA 0\n";
        assert!(matches!(
            load(Cursor::new(input)),
            Err(SchedulerError::Workload(_))
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let input = "FIFO\n2\nA 0 1\nA 1 1\n";
        assert!(matches!(
            load(Cursor::new(input)),
            Err(SchedulerError::Workload(_))
        ));
    }

    #[test]
    fn rejects_truncated_entry_list() {
        let input = "FIFO\n2\nA 0 1\n";
        assert!(matches!(
            load(Cursor::new(input)),
            Err(SchedulerError::Workload(_))
        ));
    }
}
