//! Concurrent append sink
//!
//! All records of one function are appended to the shared corpus file as a
//! single write while holding an exclusive advisory lock on `<path>.lock`.
//! Writers in other threads or processes that follow the same discipline
//! never interleave partial records; the order between functions is
//! whoever locks first.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dagx_common::DagError;
use log::{debug, warn};

/// What happened to one function's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOutcome {
    /// No output path configured
    Disabled,
    /// Nothing to write
    Empty,
    /// The whole buffer was appended
    Written { bytes: usize },
    /// The lock or the output file was unavailable; the records were dropped
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSink {
    path: Option<PathBuf>,
}

/// Exclusive lock held for as long as the guard lives
struct LockGuard {
    file: File,
}

impl LockGuard {
    fn acquire(file: File, lock: impl FnOnce(&File) -> io::Result<()>) -> io::Result<Self> {
        lock(&file)?;
        Ok(Self { file })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("failed to release output lock: {e}");
        }
    }
}

impl AppendSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `<path>.lock`, next to the output file
    pub fn lock_path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(|path| {
            let mut name = OsString::from(path.as_os_str());
            name.push(".lock");
            PathBuf::from(name)
        })
    }

    /// Append `buffer` as one contiguous write.
    ///
    /// Failing to open the lock file is an environment fault and the only
    /// error returned. Failing to take the lock or to open or write the
    /// output drops this buffer and reports [`SinkOutcome::Dropped`].
    pub fn append(&self, buffer: &str) -> Result<SinkOutcome, DagError> {
        self.append_with_lock(buffer, File::lock)
    }

    /// [`append`](Self::append) with `lock` taking the exclusive lock
    fn append_with_lock(
        &self,
        buffer: &str,
        lock: impl FnOnce(&File) -> io::Result<()>,
    ) -> Result<SinkOutcome, DagError> {
        let (Some(path), Some(lock_path)) = (self.path.as_deref(), self.lock_path()) else {
            return Ok(SinkOutcome::Disabled);
        };
        if buffer.is_empty() {
            return Ok(SinkOutcome::Empty);
        }

        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| DagError::LockFileOpen {
                path: lock_path.display().to_string(),
                message: e.to_string(),
            })?;

        let _guard = match LockGuard::acquire(lock_file, lock) {
            Ok(guard) => guard,
            Err(e) => {
                warn!("failed to lock {}: {e}; dropping records", lock_path.display());
                return Ok(SinkOutcome::Dropped);
            }
        };

        let mut output = match OpenOptions::new().append(true).create(true).open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("failed to open output file {}: {e}", path.display());
                return Ok(SinkOutcome::Dropped);
            }
        };

        if let Err(e) = output.write_all(buffer.as_bytes()) {
            warn!("failed to write to {}: {e}", path.display());
            return Ok(SinkOutcome::Dropped);
        }

        debug!("appended {} bytes to {}", buffer.len(), path.display());
        Ok(SinkOutcome::Written { bytes: buffer.len() })
    }
}
