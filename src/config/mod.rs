//! Configuration: what `configure` needs to build sinks and set thresholds.
//!
//! A `Config` is plain data. It comes from TOML (`load`, `load_from`, `from_toml_str`), from
//! [`ConfigBuilder`], or from `Default`, and is never mutated by the library once handed over.

mod builder;
mod size;

pub use builder::ConfigBuilder;
pub use size::parse_size;

use crate::internal;
use crate::layout::Layout;
use crate::level::LevelFilter;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_PATTERN: &str = "%d - [%p::%c::%C] - %m%n";
pub const DEFAULT_CONSOLE_PATTERN: &str = "%m%n";
pub const DEFAULT_FILE_NAME: &str = "logprinter.log";
pub const DEFAULT_MAX_BACKUPS: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024;

/// Which sinks `configure` attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SinkToggles {
    #[serde(rename = "use_file_sink")]
    pub file: bool,
    #[serde(rename = "use_console_sink")]
    pub console: bool,
}

impl Default for SinkToggles {
    fn default() -> Self {
        Self {
            file: true,
            console: true,
        }
    }
}

/// An empty TOML document is a valid config: every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threshold for loggers without a more specific entry in `levels`.
    pub root_level: LevelFilter,
    pub file_pattern: String,
    pub console_pattern: String,
    /// Active log file. A leading `~` is expanded; the parent directory must already exist.
    pub file_name: String,
    pub max_backup_count: usize,
    #[serde(deserialize_with = "size::deserialize")]
    pub max_file_size_bytes: u64,
    /// Flush the file writer after every line.
    pub immediate_flush: bool,
    #[serde(flatten)]
    pub sinks: SinkToggles,
    /// Tear down previously registered sinks before attaching the new ones.
    pub reset_before_apply: bool,
    /// Attach file/line of the logging call to each record (`%F`, `%L`, `%C`).
    pub capture_call_site_info: bool,
    /// The library's own trace/debug/info diagnostics on stderr.
    pub internal_debugging: bool,
    /// Dotted logger name to threshold; `org.apache` also covers `org.apache.http`.
    pub levels: BTreeMap<String, LevelFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_level: LevelFilter::Debug,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            console_pattern: DEFAULT_CONSOLE_PATTERN.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_backup_count: DEFAULT_MAX_BACKUPS,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            immediate_flush: true,
            sinks: SinkToggles::default(),
            reset_before_apply: true,
            capture_call_site_info: false,
            internal_debugging: false,
            levels: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Defaults with a different log file.
    #[must_use]
    pub fn with_file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Defaults, then only the root threshold and log file changed.
    #[must_use]
    pub fn with_file_and_level(file_name: impl Into<String>, root_level: LevelFilter) -> Self {
        Self {
            root_level,
            ..Self::with_file(file_name)
        }
    }

    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads the per-user config file, or returns defaults when there is none.
    ///
    /// # Errors
    /// Fails if the file exists but can't be read, parsed, or validated.
    pub fn load() -> Result<Self, crate::Error> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                internal::debug("CONFIG", "No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/logprinter/logprinter.toml`, when the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "logprinter")
            .map(|dirs| dirs.config_dir().join("logprinter.toml"))
    }

    /// # Errors
    /// Fails if the file can't be read, has a TOML syntax error, or doesn't validate.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// # Errors
    /// TOML syntax or type errors, then anything [`validate`](Self::validate) rejects.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `file_name` with a leading `~` expanded.
    #[must_use]
    pub fn resolved_file_name(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.file_name).into_owned())
    }

    /// # Errors
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) describing the first violation.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(crate::Error::InvalidConfig(
                "max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.sinks.file && self.file_name.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "file_name must not be empty when the file sink is enabled".to_string(),
            ));
        }
        self.file_layout()?;
        self.console_layout()?;
        Ok(())
    }

    /// # Errors
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) when `file_pattern` doesn't parse.
    pub fn file_layout(&self) -> Result<Layout, crate::Error> {
        Layout::parse(&self.file_pattern)
            .map_err(|e| crate::Error::InvalidConfig(format!("file_pattern: {e}")))
    }

    /// # Errors
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) when `console_pattern` doesn't parse.
    pub fn console_layout(&self) -> Result<Layout, crate::Error> {
        Layout::parse(&self.console_pattern)
            .map_err(|e| crate::Error::InvalidConfig(format!("console_pattern: {e}")))
    }
}
