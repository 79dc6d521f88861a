//! Unified error type for all logprinter operations.

use crate::fmt::FormatError;
use crate::level::ParseLevelError;
use std::path::PathBuf;

/// Error type for logprinter operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error outside of sink startup.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// A config value violates its invariant.
    InvalidConfig(String),
    /// The rolling file could not be opened when the sinks were built.
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// printf-style message formatting failed at the call site.
    Format(FormatError),
    /// The file worker has stopped; nothing more will reach the file.
    SinkFailed(String),
    /// Invalid log level string.
    InvalidLevel(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::InvalidConfig(s) => write!(f, "invalid config: {s}"),
            Self::FileOpen { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::Format(e) => write!(f, "format error: {e}"),
            Self::SinkFailed(s) => write!(f, "file sink failed: {s}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::FileOpen { source: e, .. } => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ParseLevelError> for Error {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e.input().to_string())
    }
}
