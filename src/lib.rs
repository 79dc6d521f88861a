#![forbid(unsafe_code)]

//! `logprinter` - a thread-safe logging front end with rolling file and console sinks.
//!
//! - printf-style message templates with typed arguments
//! - one-shot tags that group a single line under a marker
//! - error chains appended as `Caused by:` lines
//! - JSON and XML payloads pretty-printed before they are logged
//! - a size-rolling log file written by a background worker, in submission order
//! - best-effort console output that never fails a logging call
//!
//! # Example
//!
//! ```no_run
//! use logprinter::{Arg, Config, Directory, Printer, configure};
//! use std::sync::Arc;
//!
//! let directory = Arc::new(Directory::new());
//! configure(&Config::with_file("/var/log/app/app.log"), &directory)?;
//!
//! let printer = Printer::named(Arc::clone(&directory), "app.net");
//! printer.info("listening on port %d", &[Arg::from(8080)])?;
//! printer.tag("HANDSHAKE").debug("peer %s accepted", &[Arg::from("10.0.0.7")])?;
//! printer.json(r#"{"status":"ok","peers":3}"#)?;
//!
//! directory.shutdown();
//! # Ok::<(), logprinter::Error>(())
//! ```

pub mod config;
pub mod configure;
pub mod directory;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod layout;
pub mod level;
pub mod printer;
pub mod rotation;
pub mod sink;
pub mod structured;

pub use config::{Config, ConfigBuilder, SinkToggles};
pub use configure::{configure, configure_with_target};
pub use directory::{Directory, Marker};
pub use error::Error;
pub use fmt::{Arg, FormatError, render_chain, sprintf};
pub use layout::Layout;
pub use level::{LevelFilter, ParseLevelError, Priority, Severity};
pub use printer::{PendingTag, Printer, Tagged};
pub use rotation::RotationPolicy;
pub use sink::{AsyncFileSink, CallSite, ConsoleSink, ConsoleTarget, LogRecord, Sink, StdStreams};
pub use structured::{PayloadError, pretty_json, pretty_xml};
