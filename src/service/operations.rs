//! Checkout, checkin and listing operations.

use super::types::FileStatus;
use crate::error::{PdmError, Result};
use crate::repository::FileRepository;
use crate::store::{LockRecord, LockStore, validate_message};

/// Minimum length of a user name on checkout.
pub const MIN_USER_LEN: usize = 3;

/// Checkout/checkin facade over a repository and its lock store.
#[derive(Debug, Clone)]
pub struct PdmService {
    store: LockStore,
    repository: FileRepository,
}

impl PdmService {
    pub fn new(store: LockStore, repository: FileRepository) -> Self {
        Self { store, repository }
    }

    pub fn store(&self) -> &LockStore {
        &self.store
    }

    pub fn repository(&self) -> &FileRepository {
        &self.repository
    }

    /// List every repository file with its checkout state.
    ///
    /// Uses a single lock table snapshot.
    pub fn list_with_status(&self) -> Result<Vec<FileStatus>> {
        let files = self.repository.list_with_metadata()?;
        let table = self.store.load();

        Ok(files
            .into_iter()
            .map(|(name, metadata)| {
                let lock = table.get(&name);
                FileStatus::new(&name, metadata, lock)
            })
            .collect())
    }

    /// Get the checkout state of a single file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileStatus)` - File exists in the repository
    /// * `Err(PdmError::FileNotFound)` - File is not in the repository
    pub fn file_info(&self, filename: &str) -> Result<FileStatus> {
        let metadata = self.repository.metadata(filename)?;
        let lock = self.store.lock_info(filename);
        Ok(FileStatus::new(filename, metadata, lock.as_ref()))
    }

    /// Check out `filename` for `user`.
    ///
    /// # Returns
    ///
    /// * `Ok(LockRecord)` - The new checkout
    /// * `Err(PdmError::InvalidRequest)` - Empty filename, short user or bad message
    /// * `Err(PdmError::FileNotFound)` - File is not in the repository
    /// * `Err(PdmError::AlreadyLocked)` - Someone already holds the checkout
    pub fn checkout(&self, filename: &str, user: &str, message: &str) -> Result<LockRecord> {
        validate_filename(filename)?;
        validate_user(user)?;
        validate_message(message)?;

        self.repository.metadata(filename)?;
        self.store.acquire(filename, user, message)
    }

    /// Check in `filename` on behalf of `user`.
    ///
    /// # Returns
    ///
    /// * `Ok(LockRecord)` - The checkout that was released
    /// * `Err(PdmError::NotLocked)` - File is not checked out
    /// * `Err(PdmError::NotOwner)` - File is checked out by someone else
    pub fn checkin(&self, filename: &str, user: &str) -> Result<LockRecord> {
        validate_filename(filename)?;
        self.store.release(filename, user)
    }

    /// Release the checkout of `filename` whoever holds it.
    pub fn force_checkin(&self, filename: &str) -> Result<LockRecord> {
        validate_filename(filename)?;
        self.store.force_release(filename)
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(PdmError::InvalidRequest(
            "filename must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_user(user: &str) -> Result<()> {
    if user.trim().chars().count() < MIN_USER_LEN {
        return Err(PdmError::InvalidRequest(format!(
            "user must be at least {} characters",
            MIN_USER_LEN
        )));
    }
    Ok(())
}
