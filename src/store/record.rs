//! Lock record structures and control file encoding.

use crate::error::{PdmError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Maximum length of a checkout message, in characters.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Mapping from filename to its lock record.
///
/// A filename appears at most once; absence means the file is available.
pub type LockTable = BTreeMap<String, LockRecord>;

/// Lock record stored in the control file, keyed by filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// User holding the checkout.
    #[serde(rename = "user")]
    pub owner: String,

    /// When the checkout was taken (RFC3339, UTC).
    #[serde(rename = "timestamp")]
    pub acquired_at: DateTime<Utc>,

    /// Why the file was checked out.
    pub message: String,
}

impl LockRecord {
    /// Create a new lock record stamped with the current time.
    pub fn new(owner: &str, message: &str) -> Self {
        Self {
            owner: owner.to_string(),
            acquired_at: Utc::now(),
            message: message.to_string(),
        }
    }

    /// Calculate how long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.acquired_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }
}

/// Check that `message` is 1 to [`MAX_MESSAGE_LEN`] characters and not blank.
pub fn validate_message(message: &str) -> Result<()> {
    let len = message.chars().count();
    if message.trim().is_empty() || len > MAX_MESSAGE_LEN {
        return Err(PdmError::InvalidRequest(format!(
            "message must be between 1 and {} characters (got {})",
            MAX_MESSAGE_LEN, len
        )));
    }
    Ok(())
}

/// Decode control file content.
///
/// Blank content is an empty table. Malformed content, including bytes that
/// are not UTF-8, is logged and also treated as an empty table so readers
/// stay available.
pub(super) fn decode_table(path: &Path, content: &[u8]) -> LockTable {
    if content.trim_ascii().is_empty() {
        return LockTable::new();
    }

    match serde_json::from_slice(content) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "failed to parse lock table, treating as empty"
            );
            LockTable::new()
        }
    }
}

/// Encode a table for the control file.
pub(super) fn encode_table(table: &LockTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}
