//! Load, save and locked read-modify-write operations on the control file.

use super::record::{LockRecord, LockTable, decode_table, encode_table, validate_message};
use crate::error::{PdmError, Result};
use crate::lockfile::{LockedFile, OpenMode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Handle to the on-disk lock table.
///
/// Holds nothing but the control file path; every call goes back to disk.
/// Cloning is cheap and each clone is as good as an independent worker.
#[derive(Debug, Clone)]
pub struct LockStore {
    path: PathBuf,
}

impl LockStore {
    /// Open the store backed by `path`, initializing a missing or empty
    /// control file to `{}`.
    ///
    /// The emptiness check and the initial write happen under the file lock,
    /// so a store opened concurrently with a running mutation never erases it.
    ///
    /// # Returns
    ///
    /// * `Ok(LockStore)` - Control file exists and is initialized
    /// * `Err(PdmError::StoreIo)` - Directory or file could not be created
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| PdmError::store_io(parent, e))?;
        }

        let mut file =
            LockedFile::open(&path, OpenMode::ReadWrite).map_err(|e| PdmError::store_io(&path, e))?;
        let content = file
            .read_contents()
            .map_err(|e| PdmError::store_io(&path, e))?;
        if content.trim_ascii().is_empty() {
            file.replace_contents(b"{}")
                .map_err(|e| PdmError::store_io(&path, e))?;
            debug!(path = %path.display(), "initialized empty lock table");
        }

        Ok(Self { path })
    }

    /// Get the control file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current lock table.
    ///
    /// A missing, empty or malformed control file yields an empty table.
    /// Failures are logged, never returned.
    pub fn load(&self) -> LockTable {
        let mut file = match LockedFile::open(&self.path, OpenMode::Read) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LockTable::new(),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to open lock table");
                return LockTable::new();
            }
        };

        match file.read_contents() {
            Ok(content) => decode_table(&self.path, &content),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to read lock table");
                LockTable::new()
            }
        }
    }

    /// Overwrite the control file with `table`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Table written and synced
    /// * `Err(PdmError::StoreIo)` - Open, write or sync failed
    pub fn save(&self, table: &LockTable) -> Result<()> {
        let json = encode_table(table).map_err(|e| PdmError::store_io(&self.path, e.into()))?;
        let mut file = LockedFile::open(&self.path, OpenMode::ReadWrite)
            .map_err(|e| PdmError::store_io(&self.path, e))?;
        file.replace_contents(json.as_bytes())
            .map_err(|e| PdmError::store_io(&self.path, e))
    }

    /// Check whether `filename` has a lock record.
    pub fn is_locked(&self, filename: &str) -> bool {
        self.load().contains_key(filename)
    }

    /// Get the lock record for `filename`, if any.
    pub fn lock_info(&self, filename: &str) -> Option<LockRecord> {
        self.load().remove(filename)
    }

    /// Record a checkout of `filename` by `owner`.
    ///
    /// # Returns
    ///
    /// * `Ok(LockRecord)` - The newly stored record
    /// * `Err(PdmError::InvalidRequest)` - Message is blank or too long (table untouched)
    /// * `Err(PdmError::AlreadyLocked)` - A record already exists (table untouched)
    /// * `Err(PdmError::StoreIo)` - Control file could not be read or written
    pub fn acquire(&self, filename: &str, owner: &str, message: &str) -> Result<LockRecord> {
        validate_message(message)?;

        let record = self.modify(|table| {
            if let Some(existing) = table.get(filename) {
                return Err(PdmError::AlreadyLocked {
                    filename: filename.to_string(),
                    owner: existing.owner.clone(),
                    timestamp: existing.acquired_at,
                });
            }

            let record = LockRecord::new(owner, message);
            table.insert(filename.to_string(), record.clone());
            Ok(record)
        })?;

        info!(filename, owner, "lock acquired");
        Ok(record)
    }

    /// Remove the checkout of `filename`, which must be held by `owner`.
    ///
    /// # Returns
    ///
    /// * `Ok(LockRecord)` - The removed record
    /// * `Err(PdmError::NotLocked)` - No record exists (table untouched)
    /// * `Err(PdmError::NotOwner)` - Record held by someone else (table untouched)
    /// * `Err(PdmError::StoreIo)` - Control file could not be read or written
    pub fn release(&self, filename: &str, owner: &str) -> Result<LockRecord> {
        let record = self.modify(|table| {
            let existing = table
                .get(filename)
                .ok_or_else(|| PdmError::NotLocked(filename.to_string()))?;

            if existing.owner != owner {
                return Err(PdmError::NotOwner {
                    filename: filename.to_string(),
                    owner: existing.owner.clone(),
                    requested: owner.to_string(),
                });
            }

            table
                .remove(filename)
                .ok_or_else(|| PdmError::NotLocked(filename.to_string()))
        })?;

        info!(filename, owner, "lock released");
        Ok(record)
    }

    /// Remove the checkout of `filename` regardless of who holds it.
    ///
    /// Administrative escape hatch for checkouts whose owner is unavailable.
    pub fn force_release(&self, filename: &str) -> Result<LockRecord> {
        let record = self.modify(|table| {
            table
                .remove(filename)
                .ok_or_else(|| PdmError::NotLocked(filename.to_string()))
        })?;

        info!(filename, owner = %record.owner, "lock force-released");
        Ok(record)
    }

    /// Run one read-modify-write cycle with the control file locked throughout.
    ///
    /// If `apply` fails nothing is written.
    fn modify<T>(&self, apply: impl FnOnce(&mut LockTable) -> Result<T>) -> Result<T> {
        let mut file = LockedFile::open(&self.path, OpenMode::ReadWrite)
            .map_err(|e| PdmError::store_io(&self.path, e))?;

        let content = file
            .read_contents()
            .map_err(|e| PdmError::store_io(&self.path, e))?;
        let mut table = decode_table(&self.path, &content);

        let value = apply(&mut table)?;

        let json = encode_table(&table).map_err(|e| PdmError::store_io(&self.path, e.into()))?;
        file.replace_contents(json.as_bytes())
            .map_err(|e| PdmError::store_io(&self.path, e))?;

        Ok(value)
    }
}
