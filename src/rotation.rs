//! Size-based rolling of the active log file into numbered backups.
//!
//! The active file is always `name`; backups are `name.1` (newest) through `name.N` (oldest).
//! Rolling shifts every backup up by one, evicts whatever falls off the end, and renames the
//! active file to `name.1`. With zero backups the active file is simply truncated.

use crate::internal;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// When to roll and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_file_size: u64,
    max_backups: usize,
}

impl RotationPolicy {
    /// `max_file_size` is expected to be non-zero; config validation rejects zero before
    /// a policy is ever built.
    #[must_use]
    pub const fn new(max_file_size: u64, max_backups: usize) -> Self {
        Self {
            max_file_size,
            max_backups,
        }
    }

    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    #[must_use]
    pub const fn max_backups(&self) -> usize {
        self.max_backups
    }

    /// Checked against the size *after* a write, so reaching the threshold exactly rolls
    /// before the next write. A single record larger than the threshold rolls every time.
    #[must_use]
    pub const fn should_rotate(&self, current_size: u64) -> bool {
        current_size >= self.max_file_size
    }

    /// `app.log` + 2 -> `app.log.2`
    #[must_use]
    pub fn backup_path(active: &Path, index: usize) -> PathBuf {
        let mut name = active.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts backups and moves the active file to `.1`. The active file must be closed by the
    /// caller; a missing active file is not an error (nothing to archive).
    ///
    /// # Errors
    /// Any rename or removal failure.
    pub fn roll(&self, active: &Path) -> io::Result<()> {
        if self.max_backups == 0 {
            return Ok(());
        }

        let oldest = Self::backup_path(active, self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
            internal::trace("ROTATE", &format!("Evicted {}", oldest.display()));
        }

        for index in (1..self.max_backups).rev() {
            let from = Self::backup_path(active, index);
            if from.exists() {
                fs::rename(&from, Self::backup_path(active, index + 1))?;
            }
        }

        if active.exists() {
            fs::rename(active, Self::backup_path(active, 1))?;
        }
        Ok(())
    }
}

/// The rolling file itself: handle, running size, and the policy that decides when to roll.
/// Owned by exactly one writer.
#[derive(Debug)]
pub struct RollingFile {
    path: PathBuf,
    policy: RotationPolicy,
    /// `None` only between closing the old file and reopening a fresh one.
    writer: Option<BufWriter<File>>,
    size: u64,
    immediate_flush: bool,
    rotations: u64,
}

impl RollingFile {
    /// Opens (or creates) the active file for appending. Parent directories are not created:
    /// a missing directory is a configuration mistake and is reported as such.
    ///
    /// # Errors
    /// The open failure (permission, missing directory, path is a directory).
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy, immediate_flush: bool) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        internal::debug(
            "ROTATE",
            &format!("Opened {} ({size} bytes)", path.display()),
        );

        Ok(Self {
            path,
            policy,
            writer: Some(BufWriter::new(file)),
            size,
            immediate_flush,
            rotations: 0,
        })
    }

    /// Appends one already-rendered line, then rolls if the file reached the threshold.
    ///
    /// # Errors
    /// Write, flush, or rotation failures.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(closed)?;
        writer.write_all(line.as_bytes())?;
        if self.immediate_flush {
            writer.flush()?;
        }
        self.size += line.len() as u64;

        if self.policy.should_rotate(self.size) {
            self.rotate()?;
        }
        Ok(())
    }

    /// Closes the active file, rolls backups, and starts a fresh empty active file.
    ///
    /// # Errors
    /// Flush, rename, or reopen failures. After a failed reopen every later write fails.
    pub fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        self.policy.roll(&self.path)?;

        let mut options = OpenOptions::new();
        options.create(true);
        if self.policy.max_backups() == 0 {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(&self.path)?;
        self.writer = Some(BufWriter::new(file));
        self.size = 0;
        self.rotations += 1;

        internal::debug(
            "ROTATE",
            &format!("Rolled {} (rotation #{})", self.path.display(), self.rotations),
        );
        Ok(())
    }

    /// # Errors
    /// Flush failure, or the file is closed after a failed rotation.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.as_mut().ok_or_else(closed)?.flush()
    }

    /// Bytes in the active file, buffered bytes included.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn rotations(&self) -> u64 {
        self.rotations
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn closed() -> io::Error {
    io::Error::other("log file is closed after a failed rotation")
}
