//! The logger directory: one registry per process, created explicitly and shared by reference
//! with every printer and with `configure`.
//!
//! It owns the severity thresholds (root plus dotted per-name overrides), the registered sinks,
//! and the interned markers that tags resolve to.

use crate::internal;
use crate::level::{LevelFilter, Severity};
use crate::sink::{LogRecord, Sink};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Grouping token derived from a call's tag. Markers with the same name are the same marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(Arc<str>);

impl Marker {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-wide registry of thresholds and sinks.
pub struct Directory {
    root: RwLock<LevelFilter>,
    levels: RwLock<HashMap<String, LevelFilter>>,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    markers: Mutex<HashMap<String, Marker>>,
    capture_call_site: AtomicBool,
    started: Instant,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    /// Empty directory: no sinks, root threshold `debug`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RwLock::new(LevelFilter::default()),
            levels: RwLock::new(HashMap::new()),
            sinks: RwLock::new(Vec::new()),
            markers: Mutex::new(HashMap::new()),
            capture_call_site: AtomicBool::new(false),
            started: Instant::now(),
        }
    }

    pub fn set_root_level(&self, level: LevelFilter) {
        *self.root.write() = level;
    }

    #[must_use]
    pub fn root_level(&self) -> LevelFilter {
        *self.root.read()
    }

    /// Threshold for `name` and every logger below it (`org.apache` covers `org.apache.http`).
    pub fn set_level(&self, name: impl Into<String>, level: LevelFilter) {
        self.levels.write().insert(name.into(), level);
    }

    /// The closest configured ancestor's threshold, or the root's.
    #[must_use]
    pub fn effective_level(&self, name: &str) -> LevelFilter {
        let levels = self.levels.read();
        let mut candidate = name;
        loop {
            if let Some(level) = levels.get(candidate) {
                return *level;
            }
            match candidate.rfind('.') {
                Some(idx) => candidate = &candidate[..idx],
                None => return *self.root.read(),
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str, severity: Severity) -> bool {
        self.effective_level(name).allows(severity)
    }

    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        internal::debug("DIRECTORY", &format!("Registered sink '{}'", sink.name()));
        self.sinks.write().push(sink);
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    #[must_use]
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.read().iter().map(|s| s.name().to_string()).collect()
    }

    /// Closes and unregisters every sink and forgets per-name thresholds; the root goes back to
    /// its default. Lines already queued by a closing file sink are written before it stops.
    pub fn reset(&self) {
        let removed: Vec<_> = self.sinks.write().drain(..).collect();
        for sink in &removed {
            sink.close();
        }
        self.levels.write().clear();
        *self.root.write() = LevelFilter::default();
        if !removed.is_empty() {
            internal::debug(
                "DIRECTORY",
                &format!("Reset: closed {} sink(s)", removed.len()),
            );
        }
    }

    /// Same name, same marker. Blank tags carry no marker.
    #[must_use]
    pub fn marker(&self, tag: &str) -> Option<Marker> {
        if tag.trim().is_empty() {
            return None;
        }
        let mut markers = self.markers.lock();
        let marker = markers
            .entry(tag.to_string())
            .or_insert_with(|| Marker(Arc::from(tag)));
        Some(marker.clone())
    }

    pub fn set_capture_call_site(&self, enabled: bool) {
        self.capture_call_site.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn captures_call_site(&self) -> bool {
        self.capture_call_site.load(Ordering::Relaxed)
    }

    /// Milliseconds since this directory was created (the `%r` conversion).
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Drops records below the logger's threshold, otherwise hands the record to every sink.
    ///
    /// # Errors
    /// The first sink error. Every sink still receives the record.
    pub fn dispatch(&self, record: &LogRecord) -> Result<(), crate::Error> {
        if !self.is_enabled(&record.logger, record.severity) {
            return Ok(());
        }

        let mut first_error = None;
        for sink in self.sinks.read().iter() {
            if let Err(e) = sink.write(record)
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// # Errors
    /// The first sink that fails to flush.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for sink in self.sinks.read().iter() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Flushes, closes, and unregisters every sink. The directory can be configured again
    /// afterwards.
    pub fn shutdown(&self) {
        if let Err(e) = self.flush() {
            internal::warn("DIRECTORY", &format!("Flush during shutdown failed: {e}"));
        }
        let removed: Vec<_> = self.sinks.write().drain(..).collect();
        for sink in &removed {
            sink.close();
        }
        internal::debug("DIRECTORY", "Shut down");
    }
}
