//! Destinations for routed records. The printer never talks to a sink directly: the
//! [`Directory`](crate::Directory) fans each record out to whatever sinks are registered.

mod console;
mod file;

pub use console::{ConsoleSink, ConsoleTarget, StdStreams};
pub use file::AsyncFileSink;

use crate::directory::Marker;
use crate::level::{Priority, Severity};
use chrono::{DateTime, Local};
use std::panic::Location;
use std::sync::Arc;

/// Where a logging call was made. Only attached when call-site capture is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    #[must_use]
    pub const fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// `src/net/conn.rs` becomes `src::net::conn`.
    #[must_use]
    pub fn module(&self) -> String {
        self.file
            .trim_end_matches(".rs")
            .replace(['/', '\\'], "::")
    }

    /// Last path component of the source file.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }
}

/// One fully assembled log line on its way to the sinks. Built per call, consumed, dropped.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// The priority the caller used; `Assert` survives here even though it routes as `Error`.
    pub priority: Priority,
    pub severity: Severity,
    /// Dotted logger name the printer logs under.
    pub logger: Arc<str>,
    pub marker: Option<Marker>,
    /// Final text: formatted, throwable appended, never empty.
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub thread: String,
    /// Milliseconds since the directory was created.
    pub relative_ms: u64,
    pub location: Option<CallSite>,
}

impl LogRecord {
    /// Stamps the record with the current time and thread; no marker, location, or offset.
    #[must_use]
    pub fn now(priority: Priority, logger: Arc<str>, message: String) -> Self {
        let thread = std::thread::current();
        Self {
            priority,
            severity: priority.severity(),
            logger,
            marker: None,
            message,
            timestamp: Local::now(),
            thread: thread.name().unwrap_or("unnamed").to_string(),
            relative_ms: 0,
            location: None,
        }
    }
}

/// `Send + Sync` so one directory can be shared by every calling thread.
pub trait Sink: Send + Sync {
    /// Registration name (`"file"`, `"console"`), used when listing a directory's sinks.
    fn name(&self) -> &str;

    /// Accepts one record. Sinks that decouple I/O return once the record is queued.
    ///
    /// # Errors
    /// Sink-specific; the console sink never fails.
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// Blocks until everything accepted so far has reached the backing device.
    ///
    /// # Errors
    /// I/O errors from the underlying device.
    fn flush(&self) -> Result<(), crate::Error>;

    /// Releases the sink's resources. Called when a directory is reset or shut down.
    fn close(&self) {}
}
