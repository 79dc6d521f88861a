//! Shared helpers: a console target that records what it is given, and one that always fails.

#![allow(dead_code)]

use logprinter::{ConsoleSink, ConsoleTarget, Directory, Layout, LevelFilter, Severity};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub severity: Severity,
    pub tag: String,
    pub line: String,
}

#[derive(Clone, Default)]
pub struct Capture {
    lines: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    pub fn lines(&self) -> Vec<Captured> {
        self.lines.lock().unwrap().clone()
    }

    /// Rendered lines with the trailing newline removed.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|c| c.line.strip_suffix('\n').unwrap_or(&c.line).to_string())
            .collect()
    }
}

impl ConsoleTarget for Capture {
    fn emit(&self, severity: Severity, tag: &str, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(Captured {
            severity,
            tag: tag.to_string(),
            line: line.to_string(),
        });
        Ok(())
    }
}

pub struct Failing;

impl ConsoleTarget for Failing {
    fn emit(&self, _severity: Severity, _tag: &str, _line: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "device log unavailable"))
    }

    fn flush(&self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "device log unavailable"))
    }
}

/// A directory that lets everything through to one capturing console sink.
pub fn capture_directory(pattern: &str) -> (Arc<Directory>, Capture) {
    let capture = Capture::default();
    let directory = Arc::new(Directory::new());
    directory.set_root_level(LevelFilter::All);
    directory.add_sink(Arc::new(ConsoleSink::with_target(
        Layout::parse(pattern).unwrap(),
        capture.clone(),
    )));
    (directory, capture)
}
