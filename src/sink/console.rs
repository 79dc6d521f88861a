//! Console / device-log output. Synchronous, unqueued, and best-effort: a failed write is
//! counted and otherwise ignored, because console output is diagnostic only.

use super::{LogRecord, Sink};
use crate::internal;
use crate::layout::Layout;
use crate::level::Severity;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// The platform channel the console sink writes into.
pub trait ConsoleTarget: Send + Sync {
    /// Emits one rendered line. `tag` is what a device log files the line under: the marker
    /// when the call was tagged, otherwise the logger name.
    ///
    /// # Errors
    /// Whatever the platform reports; the sink swallows it.
    fn emit(&self, severity: Severity, tag: &str, line: &str) -> io::Result<()>;

    /// # Errors
    /// Whatever the platform reports; the sink swallows it.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Process stdio: warnings and errors on stderr, the rest on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStreams;

impl ConsoleTarget for StdStreams {
    fn emit(&self, severity: Severity, _tag: &str, line: &str) -> io::Result<()> {
        if severity >= Severity::Warn {
            io::stderr().lock().write_all(line.as_bytes())
        } else {
            io::stdout().lock().write_all(line.as_bytes())
        }
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()
    }
}

/// Renders with the console pattern and hands the line to a [`ConsoleTarget`].
pub struct ConsoleSink {
    layout: Layout,
    target: Box<dyn ConsoleTarget>,
    faults: AtomicU64,
}

impl ConsoleSink {
    /// Writes to [`StdStreams`].
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self::with_target(layout, StdStreams)
    }

    #[must_use]
    pub fn with_target(layout: Layout, target: impl ConsoleTarget + 'static) -> Self {
        Self {
            layout,
            target: Box::new(target),
            faults: AtomicU64::new(0),
        }
    }

    /// Writes the target rejected since the sink was built.
    #[must_use]
    pub fn fault_count(&self) -> u64 {
        self.faults.load(Ordering::Relaxed)
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        let line = self.layout.render(record);
        let tag = record
            .marker
            .as_ref()
            .map_or(&*record.logger, |marker| marker.name());

        if let Err(e) = self.target.emit(record.severity, tag, &line) {
            self.faults.fetch_add(1, Ordering::Relaxed);
            internal::debug("CONSOLE", &format!("Console write dropped: {e}"));
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        if let Err(e) = self.target.flush() {
            internal::debug("CONSOLE", &format!("Console flush failed: {e}"));
        }
        Ok(())
    }
}
