//! logprinter's own diagnostics: sink startup, rotation, swallowed console faults.
//!
//! Lines go to stderr through a console sink of their own, so they share the formatting
//! pipeline without ever touching a user's directory. Warnings and errors always print;
//! trace/debug/info only while internal debugging is switched on (the `internal_debugging`
//! config key).

use crate::layout::Layout;
use crate::level::{Priority, Severity};
use crate::sink::{ConsoleSink, ConsoleTarget, LogRecord, Sink};
use std::cell::Cell;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

const PATTERN: &str = "logprinter: %-5p %c  %m%n";

static DEBUGGING: AtomicBool = AtomicBool::new(false);
static INTERNAL_SINK: OnceLock<ConsoleSink> = OnceLock::new();

thread_local! {
    // A console fault inside an internal write would otherwise report itself forever.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

struct Stderr;

impl ConsoleTarget for Stderr {
    fn emit(&self, _severity: Severity, _tag: &str, line: &str) -> io::Result<()> {
        io::stderr().lock().write_all(line.as_bytes())
    }
}

/// Switches trace/debug/info diagnostics on or off for the whole process.
pub fn set_debugging(enabled: bool) {
    let was = DEBUGGING.swap(enabled, Ordering::Relaxed);
    if enabled && !was {
        debug("INTERNAL", "Internal debugging enabled");
    }
}

#[must_use]
pub fn debugging() -> bool {
    DEBUGGING.load(Ordering::Relaxed)
}

fn sink() -> &'static ConsoleSink {
    INTERNAL_SINK.get_or_init(|| {
        ConsoleSink::with_target(Layout::parse(PATTERN).unwrap_or_default(), Stderr)
    })
}

fn log(priority: Priority, scope: &str, msg: &str) {
    if priority < Priority::Warn && !debugging() {
        return;
    }
    if WRITING.with(|w| w.replace(true)) {
        return;
    }
    let record = LogRecord::now(priority, scope.into(), msg.to_string());
    let _ = sink().write(&record);
    WRITING.with(|w| w.set(false));
}

/// High-volume detail (per-write paths, evictions).
pub fn trace(scope: &str, msg: &str) {
    log(Priority::Trace, scope, msg);
}

/// Startup and teardown of sinks, rotations.
pub fn debug(scope: &str, msg: &str) {
    log(Priority::Debug, scope, msg);
}

/// Configuration applied.
pub fn info(scope: &str, msg: &str) {
    log(Priority::Info, scope, msg);
}

/// Something was skipped or degraded but logging continues.
pub fn warn(scope: &str, msg: &str) {
    log(Priority::Warn, scope, msg);
}

/// A sink stopped or could not start.
pub fn error(scope: &str, msg: &str) {
    log(Priority::Error, scope, msg);
}
