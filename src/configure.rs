//! Applies a [`Config`] to a [`Directory`]: builds the sinks, swaps them in, sets thresholds.

use crate::config::Config;
use crate::directory::Directory;
use crate::internal;
use crate::rotation::RotationPolicy;
use crate::sink::{AsyncFileSink, ConsoleSink, ConsoleTarget, StdStreams};
use std::sync::Arc;

/// Wires `config` into `directory`, with console output on the process's stdio.
///
/// Sinks are built before anything in the directory changes: when the log file can't be opened
/// the directory keeps its previous sinks and thresholds.
///
/// # Errors
/// [`Error::InvalidConfig`](crate::Error::InvalidConfig) for a config that doesn't validate,
/// [`Error::FileOpen`](crate::Error::FileOpen) when the log file can't be opened.
pub fn configure(config: &Config, directory: &Directory) -> Result<(), crate::Error> {
    configure_with_target(config, directory, StdStreams)
}

/// [`configure`] with console lines going to `target` instead of stdio.
///
/// # Errors
/// Same as [`configure`].
pub fn configure_with_target(
    config: &Config,
    directory: &Directory,
    target: impl ConsoleTarget + 'static,
) -> Result<(), crate::Error> {
    config.validate()?;
    internal::set_debugging(config.internal_debugging);

    let file_sink = if config.sinks.file {
        let policy = RotationPolicy::new(config.max_file_size_bytes, config.max_backup_count);
        Some(AsyncFileSink::open(
            config.resolved_file_name(),
            config.file_layout()?,
            policy,
            config.immediate_flush,
        )?)
    } else {
        None
    };
    let console_sink = if config.sinks.console {
        Some(ConsoleSink::with_target(config.console_layout()?, target))
    } else {
        None
    };

    if config.reset_before_apply {
        directory.reset();
    }
    if let Some(sink) = file_sink {
        directory.add_sink(Arc::new(sink));
    }
    if let Some(sink) = console_sink {
        directory.add_sink(Arc::new(sink));
    }

    directory.set_root_level(config.root_level);
    for (logger, level) in &config.levels {
        directory.set_level(logger.as_str(), *level);
    }
    directory.set_capture_call_site(config.capture_call_site_info);

    internal::info(
        "CONFIGURE",
        &format!(
            "Applied: root={}, sinks=[{}], call_site={}",
            config.root_level,
            directory.sink_names().join(", "),
            config.capture_call_site_info
        ),
    );
    Ok(())
}
