//! Stepwise construction for callers that configure in code rather than from a file.

use super::Config;
use crate::level::LevelFilter;

/// Starts from [`Config::default`]; `build` validates and hands back an immutable `Config`.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn root_level(mut self, level: LevelFilter) -> Self {
        self.config.root_level = level;
        self
    }

    /// Threshold for one dotted logger name and its descendants.
    pub fn level(mut self, logger: impl Into<String>, level: LevelFilter) -> Self {
        self.config.levels.insert(logger.into(), level);
        self
    }

    pub fn file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.file_pattern = pattern.into();
        self
    }

    pub fn console_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.console_pattern = pattern.into();
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    pub const fn max_backup_count(mut self, count: usize) -> Self {
        self.config.max_backup_count = count;
        self
    }

    pub const fn max_file_size_bytes(mut self, bytes: u64) -> Self {
        self.config.max_file_size_bytes = bytes;
        self
    }

    pub const fn immediate_flush(mut self, enabled: bool) -> Self {
        self.config.immediate_flush = enabled;
        self
    }

    pub const fn use_file_sink(mut self, enabled: bool) -> Self {
        self.config.sinks.file = enabled;
        self
    }

    pub const fn use_console_sink(mut self, enabled: bool) -> Self {
        self.config.sinks.console = enabled;
        self
    }

    pub const fn reset_before_apply(mut self, enabled: bool) -> Self {
        self.config.reset_before_apply = enabled;
        self
    }

    pub const fn capture_call_site_info(mut self, enabled: bool) -> Self {
        self.config.capture_call_site_info = enabled;
        self
    }

    pub const fn internal_debugging(mut self, enabled: bool) -> Self {
        self.config.internal_debugging = enabled;
        self
    }

    /// # Errors
    /// Whatever [`Config::validate`] rejects.
    pub fn build(self) -> Result<Config, crate::Error> {
        self.config.validate()?;
        Ok(self.config)
    }
}
