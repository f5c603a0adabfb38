//! Error types for pdm.
//!
//! Uses thiserror for derive macros. Every conflict the lock store can report
//! is its own variant so callers can match on it instead of parsing messages.

use crate::exit_codes;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pdm operations.
///
/// Each variant maps to a distinct exit code and HTTP-style status so the
/// transport layer (CLI or server) can report it without inspecting text.
#[derive(Error, Debug)]
pub enum PdmError {
    /// The requested file is not present in the repository.
    #[error("file '{0}' not found in repository")]
    FileNotFound(String),

    /// A lock record already exists for the file.
    #[error("file '{filename}' is already checked out by {owner} since {timestamp}")]
    AlreadyLocked {
        filename: String,
        owner: String,
        timestamp: DateTime<Utc>,
    },

    /// Release was requested for a file that has no lock record.
    #[error("file '{0}' is not checked out")]
    NotLocked(String),

    /// Release was requested by someone other than the lock owner.
    #[error("file '{filename}' is checked out by {owner}, not {requested}")]
    NotOwner {
        filename: String,
        owner: String,
        requested: String,
    },

    /// The control file could not be opened, read or written.
    #[error("lock store I/O failed for '{}': {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A repository file or directory could not be inspected.
    #[error("repository I/O failed for '{}': {source}", .path.display())]
    RepositoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request fields failed validation (empty filename, short user, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or is invalid.
    #[error("{0}")]
    Config(String),

    /// Output could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PdmError {
    pub(crate) fn store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PdmError::StoreIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn repository_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PdmError::RepositoryIo {
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PdmError::FileNotFound(_) => exit_codes::FILE_NOT_FOUND,
            PdmError::AlreadyLocked { .. } => exit_codes::ALREADY_LOCKED,
            PdmError::NotLocked(_) => exit_codes::NOT_LOCKED,
            PdmError::NotOwner { .. } => exit_codes::NOT_OWNER,
            PdmError::StoreIo { .. } => exit_codes::STORE_IO_FAILURE,
            PdmError::RepositoryIo { .. } => exit_codes::REPOSITORY_IO_FAILURE,
            PdmError::InvalidRequest(_) => exit_codes::USER_ERROR,
            PdmError::Config(_) => exit_codes::USER_ERROR,
            PdmError::Serialization(_) => exit_codes::INTERNAL_ERROR,
        }
    }

    /// HTTP status a web layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            PdmError::FileNotFound(_) => 404,
            PdmError::AlreadyLocked { .. } => 409,
            PdmError::NotLocked(_) => 409,
            PdmError::NotOwner { .. } => 403,
            PdmError::StoreIo { .. } => 500,
            PdmError::RepositoryIo { .. } => 500,
            PdmError::InvalidRequest(_) => 422,
            PdmError::Config(_) => 500,
            PdmError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for pdm operations.
pub type Result<T> = std::result::Result<T, PdmError>;
