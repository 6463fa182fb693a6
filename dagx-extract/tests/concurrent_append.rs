//! Many writers appending to one corpus never interleave records

use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use dagx_extract::{AppendSink, SinkOutcome};

const WRITERS: usize = 16;
const ROUNDS: usize = 20;

#[test]
fn test_concurrent_writers_do_not_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dags.txt");
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Each thread owns its sink, as separate processes would
                let sink = AppendSink::new(Some(path));
                barrier.wait();
                for round in 0..ROUNDS {
                    // Large multi-line buffers make torn writes visible
                    let payload = format!("w{writer}r{round}-").repeat(2048);
                    let buffer = format!("{writer},{payload}\n{writer},{payload}\n");
                    let outcome = sink.append(&buffer).unwrap();
                    assert_eq!(outcome, SinkOutcome::Written { bytes: buffer.len() });
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), WRITERS * ROUNDS * 2);

    // Every line is whole, and each buffer's two lines are adjacent
    for pair in lines.chunks(2) {
        assert_eq!(pair[0], pair[1]);
        let (writer, payload) = pair[0].split_once(',').unwrap();
        let round = payload
            .strip_prefix(&format!("w{writer}r"))
            .and_then(|rest| rest.split('-').next())
            .unwrap();
        assert_eq!(payload, format!("w{writer}r{round}-").repeat(2048));
    }
}

#[test]
fn test_each_writer_contributes_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dags.txt");

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let sink = AppendSink::new(Some(path.clone()));
            thread::spawn(move || sink.append(&format!("1,record-{writer}\n")).unwrap())
        })
        .collect();
    for handle in handles {
        assert!(matches!(handle.join().unwrap(), SinkOutcome::Written { .. }));
    }

    let content = fs::read_to_string(&path).unwrap();
    let mut records: Vec<&str> = content.lines().collect();
    records.sort_unstable();
    let mut expected: Vec<String> = (0..WRITERS).map(|w| format!("1,record-{w}")).collect();
    expected.sort_unstable();
    assert_eq!(records, expected);
}
