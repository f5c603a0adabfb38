//! File status reported to callers.

use crate::repository::FileMetadata;
use crate::store::LockRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a file can be checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Available,
    CheckedOut,
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::Available => "available",
            FileState::CheckedOut => "checked_out",
        }
    }
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository file together with its checkout state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub name: String,
    pub status: FileState,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,

    /// Holder of the checkout, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_at: Option<DateTime<Utc>>,
}

impl FileStatus {
    pub(super) fn new(name: &str, metadata: FileMetadata, lock: Option<&LockRecord>) -> Self {
        Self {
            name: name.to_string(),
            status: if lock.is_some() {
                FileState::CheckedOut
            } else {
                FileState::Available
            },
            size_bytes: metadata.size,
            modified: metadata.modified,
            locked_by: lock.map(|l| l.owner.clone()),
            lock_message: lock.map(|l| l.message.clone()),
            locked_at: lock.map(|l| l.acquired_at),
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}", self.name, self.status)?;
        if let Some(owner) = &self.locked_by {
            write!(f, " by {}", owner)?;
        }
        write!(f, ")")
    }
}
