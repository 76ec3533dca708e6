//! Exercises loading a workload from a real file path, the same path
//! `--input FILE` takes in the CLI front-end.

use std::io::{BufReader, Write};

use sched_sim::workload;

#[test]
fn loads_a_workload_from_a_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "FIFO").unwrap();
    writeln!(file, "2").unwrap();
    writeln!(file, "A 0 3").unwrap();
    writeln!(file, "B 0 2").unwrap();

    let reopened = std::fs::File::open(file.path()).expect("reopen temp file");
    let loaded = workload::load(BufReader::new(reopened)).expect("parses");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.entries[0].name, "A");
}
