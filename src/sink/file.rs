//! Rolling file behind a queue: callers enqueue rendered lines and return, one worker thread
//! owns the file and writes lines in exactly the order they were submitted.
//!
//! The queue is unbounded. A producer that outruns the disk grows memory without limit;
//! there is no backpressure.

use super::{LogRecord, Sink};
use crate::internal;
use crate::layout::Layout;
use crate::rotation::{RollingFile, RotationPolicy};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

const WORKER_NAME: &str = "logprinter-file";

enum Command {
    Line(String),
    Flush(Sender<Result<(), String>>),
    Stop,
}

/// Single-writer rolling file sink.
pub struct AsyncFileSink {
    path: PathBuf,
    layout: Layout,
    sender: Sender<Command>,
    /// Set by the worker when it gives up; every later submit reports it.
    failure: Arc<Mutex<Option<String>>>,
    closed: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncFileSink {
    /// Opens the file on the calling thread so an unusable path fails here, not later on the
    /// worker, then starts the worker.
    ///
    /// # Errors
    /// [`Error::FileOpen`](crate::Error::FileOpen) when the file can't be opened,
    /// [`Error::Io`](crate::Error::Io) when the worker thread can't be spawned.
    pub fn open(
        path: impl Into<PathBuf>,
        layout: Layout,
        policy: RotationPolicy,
        immediate_flush: bool,
    ) -> Result<Self, crate::Error> {
        let path = path.into();
        let file = RollingFile::open(&path, policy, immediate_flush).map_err(|source| {
            internal::error(
                "FILE",
                &format!("Cannot open {}: {source}", path.display()),
            );
            crate::Error::FileOpen {
                path: path.clone(),
                source,
            }
        })?;

        let (sender, receiver) = unbounded::<Command>();
        let failure = Arc::new(Mutex::new(None));
        let worker_failure = Arc::clone(&failure);

        let handle = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || run(file, &receiver, &worker_failure))?;

        internal::debug(
            "FILE",
            &format!(
                "File sink started: {} (max {} bytes, {} backups, immediate_flush={immediate_flush})",
                path.display(),
                policy.max_file_size(),
                policy.max_backups()
            ),
        );

        Ok(Self {
            path,
            layout,
            sender,
            failure,
            closed: AtomicBool::new(false),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Queues one line. Returns as soon as the line is enqueued.
    ///
    /// # Errors
    /// [`Error::SinkFailed`](crate::Error::SinkFailed) once the worker has failed or the sink
    /// has been shut down.
    pub fn submit(&self, line: String) -> Result<(), crate::Error> {
        if let Some(cause) = self.failure.lock().as_ref() {
            return Err(crate::Error::SinkFailed(cause.clone()));
        }
        if self.closed.load(Ordering::Acquire) {
            return Err(crate::Error::SinkFailed("sink is shut down".to_string()));
        }
        self.sender
            .send(Command::Line(line))
            .map_err(|_| self.worker_gone())
    }

    /// Active file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Drains the queue, flushes, and joins the worker. Idempotent.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.sender.send(Command::Stop);
        if let Some(handle) = self.worker.lock().take()
            && handle.join().is_err()
        {
            internal::error("FILE", "File worker panicked");
        }
        internal::debug(
            "FILE",
            &format!("File sink stopped: {}", self.path.display()),
        );
    }

    fn worker_gone(&self) -> crate::Error {
        let cause = self
            .failure
            .lock()
            .clone()
            .unwrap_or_else(|| "file worker is not running".to_string());
        crate::Error::SinkFailed(cause)
    }
}

impl Sink for AsyncFileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        self.submit(self.layout.render(record))
    }

    fn flush(&self) -> Result<(), crate::Error> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        let (ack, done) = bounded(1);
        self.sender
            .send(Command::Flush(ack))
            .map_err(|_| self.worker_gone())?;
        match done.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(cause)) => Err(crate::Error::SinkFailed(cause)),
            Err(_) => Err(self.worker_gone()),
        }
    }

    fn close(&self) {
        self.shutdown();
    }
}

impl Drop for AsyncFileSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Worker loop. A write or rotation failure is latched and ends the loop: no retries, and from
/// then on the file receives nothing.
fn run(mut file: RollingFile, receiver: &Receiver<Command>, failure: &Mutex<Option<String>>) {
    for command in receiver {
        match command {
            Command::Line(line) => {
                if let Err(e) = file.write_line(&line) {
                    let cause = format!("{}: {e}", file.path().display());
                    internal::error("FILE", &format!("Write failed, file sink stopped: {cause}"));
                    *failure.lock() = Some(cause);
                    return;
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(file.flush().map_err(|e| e.to_string()));
            }
            Command::Stop => break,
        }
    }

    if let Err(e) = file.flush() {
        internal::warn("FILE", &format!("Final flush failed: {e}"));
    }
}
