use std::thread;

use pid_loop_monitor::{CsvExporter, SessionConfig, SimulationSession, TimeSource, CSV_HEADER};

const HEADER_LINE: &str = "Time,Setpoint,Process Variable,Error,Control Output,Integral,Adjusting Parameter";

fn session_with_ticks(ticks: usize) -> SimulationSession {
    let config = SessionConfig {
        time_source: TimeSource::Simulated,
        ..SessionConfig::default()
    };
    let mut session = SimulationSession::new(config).unwrap();
    for _ in 0..ticks {
        session.tick_default().unwrap();
    }
    session
}

#[test]
fn empty_history_exports_header_only() {
    let session = session_with_ticks(0);
    let csv = String::from_utf8(session.export_csv().unwrap()).unwrap();
    assert_eq!(csv, format!("{HEADER_LINE}\n"));
    assert_eq!(CSV_HEADER.join(","), HEADER_LINE);
}

#[test]
fn export_round_trips_history() {
    for ticks in [0, 1, 1000] {
        let session = session_with_ticks(ticks);
        let csv = session.export_csv().unwrap();

        let parsed = CsvExporter::parse(&csv).unwrap();

        assert_eq!(parsed.len(), ticks);
        assert_eq!(parsed, session.history().snapshot());
    }
}

#[test]
fn export_writes_one_line_per_sample_with_quoted_label() {
    let session = session_with_ticks(3);
    let csv = String::from_utf8(session.export_csv().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER_LINE);
    assert!(lines[1].starts_with("0.1,100.0,"));
    assert!(lines[1].ends_with(",\"Kp: 1.00, Ki: 0.10, Kd: 0.05\""));
}

#[test]
fn repeated_export_is_byte_identical() {
    let session = session_with_ticks(50);
    let first = session.export_csv().unwrap();
    let second = session.export_csv().unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_writes_file() {
    let session = session_with_ticks(10);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pid_log.csv");

    CsvExporter::save(&session.history().snapshot(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, session.export_csv().unwrap());
}

#[test]
fn parse_rejects_malformed_rows() {
    let csv = format!("{HEADER_LINE}\n0.1,100,not-a-number,1,2,3,label\n");
    assert!(CsvExporter::parse(csv.as_bytes()).is_err());
}

#[test]
fn snapshot_export_is_consistent_under_concurrent_ticks() {
    let mut session = session_with_ticks(0);
    let history = session.history();

    let exporter = thread::spawn(move || {
        let mut exports = Vec::new();
        for _ in 0..50 {
            let csv = CsvExporter::dump_history(&history).unwrap();
            exports.push(CsvExporter::parse(&csv).unwrap());
        }
        exports
    });

    for _ in 0..2000 {
        session.tick_default().unwrap();
    }
    let exports = exporter.join().unwrap();

    // Every export must be a prefix of the final history
    let full = session.history().snapshot();
    for rows in exports {
        assert!(rows.len() <= full.len());
        assert_eq!(rows[..], full[..rows.len()]);
    }
}
