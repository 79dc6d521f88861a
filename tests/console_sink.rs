mod common;

use common::{Capture, Failing};
use logprinter::{ConsoleSink, Directory, Layout, LogRecord, Priority, Severity, Sink};
use std::sync::Arc;

fn record(priority: Priority, message: &str) -> LogRecord {
    LogRecord::now(priority, Arc::from("app.net"), message.to_string())
}

#[test]
fn failed_writes_are_counted_not_returned() {
    let sink = ConsoleSink::with_target(Layout::default(), Failing);

    assert!(sink.write(&record(Priority::Info, "one")).is_ok());
    assert!(sink.write(&record(Priority::Error, "two")).is_ok());
    assert!(sink.flush().is_ok());
    assert_eq!(sink.fault_count(), 2);
}

#[test]
fn untagged_lines_are_filed_under_the_logger_name() {
    let capture = Capture::default();
    let sink = ConsoleSink::with_target(Layout::parse("%p %m%n").unwrap(), capture.clone());

    sink.write(&record(Priority::Warn, "slow")).unwrap();

    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].tag, "app.net");
    assert_eq!(lines[0].severity, Severity::Warn);
    assert_eq!(lines[0].line, "WARN slow\n");
    assert_eq!(sink.fault_count(), 0);
}

#[test]
fn tagged_lines_are_filed_under_the_marker() {
    let directory = Directory::new();
    let capture = Capture::default();
    let sink = ConsoleSink::with_target(Layout::default(), capture.clone());

    let mut rec = record(Priority::Debug, "handshake");
    rec.marker = directory.marker("TLS");
    sink.write(&rec).unwrap();

    assert_eq!(capture.lines()[0].tag, "TLS");
}

#[test]
fn console_sink_name() {
    let sink = ConsoleSink::new(Layout::default());
    assert_eq!(sink.name(), "console");
    assert_eq!(sink.layout().pattern(), "%m%n");
}
