//! The logging front end: assembles a message from a template, arguments, and an optional
//! error, resolves the tag, and routes the result through the directory.
//!
//! Every call goes through one critical section per printer. It covers tag resolution, message
//! assembly, and hand-off to the sinks, so records from concurrent callers reach each sink in the
//! order they were routed. File I/O itself happens later, on the file sink's worker.

use crate::directory::Directory;
use crate::fmt::{Arg, render_chain, sprintf};
use crate::internal;
use crate::level::{Priority, Severity};
use crate::sink::{CallSite, LogRecord};
use crate::structured::{self, PayloadError};
use parking_lot::Mutex;
use std::error::Error as StdError;
use std::fmt::Debug;
use std::panic::Location;
use std::sync::Arc;

/// Logger name used by [`Printer::new`].
pub const DEFAULT_LOGGER: &str = "default";

/// Substituted when a call carries neither text nor an error.
pub const EMPTY_MESSAGE: &str = "Empty/NULL log message";

const EMPTY_JSON: &str = "Empty/Null json content";
const INVALID_JSON: &str = "Invalid Json";
const EMPTY_XML: &str = "Empty/Null xml content";
const INVALID_XML: &str = "Invalid xml";

/// A tag waiting for the next logging call. Reading it clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTag {
    tag: Option<String>,
}

impl PendingTag {
    #[must_use]
    pub const fn new() -> Self {
        Self { tag: None }
    }

    /// Replaces any tag already pending. Blank tags are ignored.
    pub fn set(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.trim().is_empty() {
            self.tag = Some(tag);
        }
    }

    /// Returns the pending tag and leaves nothing behind.
    pub const fn take(&mut self) -> Option<String> {
        self.tag.take()
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.tag.is_some()
    }
}

/// What a routing handler needs to build one record.
struct Routed<'a> {
    logger: &'a Arc<str>,
    priority: Priority,
    tag: Option<&'a str>,
    message: String,
    location: CallSite,
}

type Route = fn(&Directory, Routed<'_>) -> Result<(), crate::Error>;

/// One handler per severity, indexed by [`Severity::index`].
const ROUTES: [Route; Severity::COUNT] = [
    route_trace,
    route_debug,
    route_info,
    route_warn,
    route_error,
];

fn route_trace(directory: &Directory, call: Routed<'_>) -> Result<(), crate::Error> {
    forward(directory, Severity::Trace, call)
}

fn route_debug(directory: &Directory, call: Routed<'_>) -> Result<(), crate::Error> {
    forward(directory, Severity::Debug, call)
}

fn route_info(directory: &Directory, call: Routed<'_>) -> Result<(), crate::Error> {
    forward(directory, Severity::Info, call)
}

fn route_warn(directory: &Directory, call: Routed<'_>) -> Result<(), crate::Error> {
    forward(directory, Severity::Warn, call)
}

/// `Assert` lands here too.
fn route_error(directory: &Directory, call: Routed<'_>) -> Result<(), crate::Error> {
    forward(directory, Severity::Error, call)
}

fn forward(directory: &Directory, severity: Severity, call: Routed<'_>) -> Result<(), crate::Error> {
    let mut record = LogRecord::now(call.priority, Arc::clone(call.logger), call.message);
    record.severity = severity;
    record.marker = call.tag.and_then(|tag| directory.marker(tag));
    record.relative_ms = directory.elapsed_ms();
    if directory.captures_call_site() {
        record.location = Some(call.location);
    }
    directory.dispatch(&record)
}

/// Final text for a call: the message, the rendered error chain, or both joined by `" : "`.
/// Never empty.
fn assemble(message: Option<&str>, chain: Option<String>) -> String {
    let message = message.unwrap_or_default();
    let text = match chain {
        Some(chain) if message.is_empty() => chain,
        Some(chain) => format!("{message} : {chain}"),
        None => message.to_string(),
    };
    if text.is_empty() {
        EMPTY_MESSAGE.to_string()
    } else {
        text
    }
}

/// Thread-safe logging front end bound to one directory and one logger name.
///
/// ```no_run
/// use logprinter::{Arg, Directory, Printer};
/// use std::sync::Arc;
///
/// let printer = Printer::new(Arc::new(Directory::new()));
/// printer.info("connected to %s in %d ms", &[Arg::from("db-1"), Arg::from(42)])?;
/// printer.tag("NET").warn("retrying", &[])?;
/// # Ok::<(), logprinter::Error>(())
/// ```
pub struct Printer {
    directory: Arc<Directory>,
    logger: Arc<str>,
    lock: Mutex<()>,
}

impl Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

impl Printer {
    /// Logs under [`DEFAULT_LOGGER`].
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        Self::named(directory, DEFAULT_LOGGER)
    }

    /// Logs under a dotted name, so per-name thresholds apply.
    #[must_use]
    pub fn named(directory: Arc<Directory>, logger: &str) -> Self {
        Self {
            directory,
            logger: Arc::from(logger),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    #[must_use]
    pub fn logger_name(&self) -> &str {
        &self.logger
    }

    /// Tags exactly the next call made through the returned context.
    pub fn tag(&self, tag: impl Into<String>) -> Tagged<'_> {
        let mut pending = PendingTag::new();
        pending.set(tag);
        Tagged {
            printer: self,
            pending,
        }
    }

    /// # Errors
    /// [`Error::Format`](crate::Error::Format) when the template and arguments disagree;
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) when the file sink has stopped.
    #[track_caller]
    pub fn trace(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Trace, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn debug(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Debug, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn info(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Info, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn warn(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Warn, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn error(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Error, None, message, args, Location::caller())
    }

    /// Routed as an error; the record keeps `Priority::Assert`.
    ///
    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn assert(&self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.print(&mut PendingTag::new(), Priority::Assert, None, message, args, Location::caller())
    }

    /// Error with its `source()` chain appended to the message.
    ///
    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn error_with(
        &self,
        throwable: &dyn StdError,
        message: &str,
        args: &[Arg<'_>],
    ) -> Result<(), crate::Error> {
        self.print(
            &mut PendingTag::new(),
            Priority::Error,
            Some(throwable),
            message,
            args,
            Location::caller(),
        )
    }

    /// The value's `Debug` form as the message.
    ///
    /// # Errors
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) when the file sink has stopped.
    #[track_caller]
    pub fn object(&self, priority: Priority, value: &impl Debug) -> Result<(), crate::Error> {
        let text = format!("{value:?}");
        self.print(&mut PendingTag::new(), priority, None, &text, &[], Location::caller())
    }

    /// Pretty-prints a JSON object or array at debug. Blank or invalid input is reported as a
    /// log line of its own, never as an error.
    ///
    /// # Errors
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) when the file sink has stopped.
    #[track_caller]
    pub fn json(&self, text: &str) -> Result<(), crate::Error> {
        self.print_json(&mut PendingTag::new(), text, Location::caller())
    }

    /// Indents an XML document at debug, same fault handling as [`json`](Self::json).
    ///
    /// # Errors
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) when the file sink has stopped.
    #[track_caller]
    pub fn xml(&self, text: &str) -> Result<(), crate::Error> {
        self.print_xml(&mut PendingTag::new(), text, Location::caller())
    }

    /// The primitive every other method ends in. `message` is used verbatim: no `%` processing.
    ///
    /// # Errors
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) when the file sink has stopped.
    #[track_caller]
    pub fn log(
        &self,
        priority: Priority,
        tag: Option<&str>,
        message: Option<&str>,
        throwable: Option<&dyn StdError>,
    ) -> Result<(), crate::Error> {
        let location = CallSite::from_location(Location::caller());
        // The chain runs foreign `Display` impls, which may log through this printer.
        let chain = throwable.map(render_chain);
        let _guard = self.lock.lock();
        self.route(priority, tag, assemble(message, chain), location)
    }

    /// Like [`log`](Self::log) but without an explicit tag consumes the caller-held `pending`
    /// tag. An explicit tag wins and leaves `pending` untouched.
    ///
    /// # Errors
    /// See [`trace`](Self::trace).
    #[track_caller]
    pub fn log_pending(
        &self,
        pending: &mut PendingTag,
        priority: Priority,
        tag: Option<&str>,
        message: &str,
        args: &[Arg<'_>],
    ) -> Result<(), crate::Error> {
        match tag {
            Some(tag) => {
                let mut explicit = PendingTag::new();
                explicit.set(tag);
                self.print(&mut explicit, priority, None, message, args, Location::caller())
            }
            None => self.print(pending, priority, None, message, args, Location::caller()),
        }
    }

    fn print(
        &self,
        pending: &mut PendingTag,
        priority: Priority,
        throwable: Option<&dyn StdError>,
        message: &str,
        args: &[Arg<'_>],
        location: &'static Location<'static>,
    ) -> Result<(), crate::Error> {
        let chain = throwable.map(render_chain);
        let _guard = self.lock.lock();
        let tag = pending.take();
        let formatted = sprintf(message, args)?;
        self.route(
            priority,
            tag.as_deref(),
            assemble(Some(&formatted), chain),
            CallSite::from_location(location),
        )
    }

    fn print_json(
        &self,
        pending: &mut PendingTag,
        text: &str,
        location: &'static Location<'static>,
    ) -> Result<(), crate::Error> {
        match structured::pretty_json(text) {
            Ok(pretty) => self.print(pending, Priority::Debug, None, &pretty, &[], location),
            Err(PayloadError::Empty) => {
                self.print(pending, Priority::Debug, None, EMPTY_JSON, &[], location)
            }
            Err(e) => {
                internal::trace("PRINTER", &format!("Rejected JSON payload: {e}"));
                self.print(pending, Priority::Error, None, INVALID_JSON, &[], location)
            }
        }
    }

    fn print_xml(
        &self,
        pending: &mut PendingTag,
        text: &str,
        location: &'static Location<'static>,
    ) -> Result<(), crate::Error> {
        match structured::pretty_xml(text) {
            Ok(pretty) => self.print(pending, Priority::Debug, None, &pretty, &[], location),
            Err(PayloadError::Empty) => {
                self.print(pending, Priority::Debug, None, EMPTY_XML, &[], location)
            }
            Err(e) => {
                internal::trace("PRINTER", &format!("Rejected XML payload: {e}"));
                self.print(pending, Priority::Error, None, INVALID_XML, &[], location)
            }
        }
    }

    /// Caller holds `self.lock`.
    fn route(
        &self,
        priority: Priority,
        tag: Option<&str>,
        message: String,
        location: CallSite,
    ) -> Result<(), crate::Error> {
        let call = Routed {
            logger: &self.logger,
            priority,
            tag,
            message,
            location,
        };
        ROUTES[priority.severity().index()](&self.directory, call)
    }
}

/// A printer with a tag attached to its next call. Every method consumes the context, so the
/// tag can't leak into a second call.
#[must_use = "the tag only applies to a logging call made through this value"]
pub struct Tagged<'a> {
    printer: &'a Printer,
    pending: PendingTag,
}

impl Tagged<'_> {
    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn trace(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Trace, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn debug(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Debug, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn info(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Info, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn warn(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Warn, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn error(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Error, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn assert(mut self, message: &str, args: &[Arg<'_>]) -> Result<(), crate::Error> {
        self.printer
            .print(&mut self.pending, Priority::Assert, None, message, args, Location::caller())
    }

    /// # Errors
    /// See [`Printer::trace`].
    #[track_caller]
    pub fn error_with(
        mut self,
        throwable: &dyn StdError,
        message: &str,
        args: &[Arg<'_>],
    ) -> Result<(), crate::Error> {
        self.printer.print(
            &mut self.pending,
            Priority::Error,
            Some(throwable),
            message,
            args,
            Location::caller(),
        )
    }

    /// # Errors
    /// See [`Printer::object`].
    #[track_caller]
    pub fn object(mut self, priority: Priority, value: &impl Debug) -> Result<(), crate::Error> {
        let text = format!("{value:?}");
        self.printer
            .print(&mut self.pending, priority, None, &text, &[], Location::caller())
    }

    /// # Errors
    /// See [`Printer::json`].
    #[track_caller]
    pub fn json(mut self, text: &str) -> Result<(), crate::Error> {
        self.printer
            .print_json(&mut self.pending, text, Location::caller())
    }

    /// # Errors
    /// See [`Printer::xml`].
    #[track_caller]
    pub fn xml(mut self, text: &str) -> Result<(), crate::Error> {
        self.printer
            .print_xml(&mut self.pending, text, Location::caller())
    }
}
