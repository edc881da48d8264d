//! Advisory whole-file lock
//!
//! A non-blocking exclusive `flock` on the store file. Cooperating processes
//! that go through `FileLock` exclude each other; anything that writes the
//! file without taking the lock is not stopped.

use crate::types::LockError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Held exclusive lock on a file
///
/// The lock is released when this value is dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Try to take the exclusive lock on `path`
    ///
    /// The file is opened read/write and must already exist. The attempt does
    /// not block and is not retried.
    ///
    /// # Errors
    ///
    /// - `LockError::Open` if the file cannot be opened
    /// - `LockError::Contended` if another holder has the lock
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self, LockError> {
        let path = path.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| LockError::Open {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if let Err(e) = FileExt::try_lock_exclusive(&file) {
            warn!(path = %path.display(), error = %e, "lock is held elsewhere");
            return Err(LockError::Contended {
                path: path.display().to_string(),
            });
        }

        debug!(path = %path.display(), "lock acquired");
        Ok(FileLock {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unlock and close the file
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        match FileExt::unlock(&self.file) {
            Ok(()) => debug!(path = %self.path.display(), "lock released"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to release lock"
            ),
        }
    }
}
