//! Exclusive advisory locking on a single file.
//!
//! [`LockedFile`] opens a path and takes an OS-level exclusive lock on it
//! before handing the file back. The lock is tied to the open file
//! description, so two threads of one process contend exactly like two
//! separate processes do.
//!
//! # Platforms
//!
//! Locking goes through `fs2::FileExt`: `flock(LOCK_EX)` on Unix and
//! `LockFileEx` on Windows. Callers only ever see `LockedFile`.
//!
//! # RAII
//!
//! The lock is released when the guard is dropped, including during panic
//! unwinding. If unlocking fails during drop a warning is logged; closing the
//! descriptor releases the lock regardless.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// How the locked file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only. Fails if the file does not exist.
    Read,
    /// Read and write, creating the file if missing. Never truncates on open.
    ReadWrite,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::ReadWrite => {
                // Truncating here would wipe the file before the lock is held.
                options.read(true).write(true).create(true).truncate(false);
            }
        }
        options
    }
}

/// An open file holding an exclusive advisory lock.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    released: bool,
}

impl LockedFile {
    /// Open `path` and block until the exclusive lock is held.
    ///
    /// If the open fails no lock is attempted and the error is returned as is.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> io::Result<Self> {
        let path = path.as_ref();
        let file = mode.options().open(path)?;
        FileExt::lock_exclusive(&file)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            released: false,
        })
    }

    /// Get the path of the locked file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file from the start as raw bytes.
    ///
    /// No decoding happens here, so only real OS failures are errors.
    pub fn read_contents(&mut self) -> io::Result<Vec<u8>> {
        let mut content = Vec::new();
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Replace the file contents with `content` and sync to disk.
    pub fn replace_contents(&mut self, content: &[u8]) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(content)?;
        self.file.sync_all()
    }

    /// Release the lock while keeping the file open.
    ///
    /// Calling this on an already released lock does nothing.
    pub fn unlock(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        FileExt::unlock(&self.file)
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if let Err(e) = self.unlock() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to release file lock"
            );
        }
    }
}
