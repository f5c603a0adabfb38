//! Checkout/checkin service.
//!
//! [`PdmService`] combines the [`FileRepository`](crate::repository::FileRepository)
//! and the [`LockStore`](crate::store::LockStore) into the operations a
//! transport layer exposes:
//!
//! - `list_with_status` / `file_info`: repository files joined with the lock table
//! - `checkout`: available → checked_out, only for files present in the repository
//! - `checkin`: checked_out → available, only by the user holding the checkout
//! - `force_checkin`: administrative checked_out → available
//!
//! Conflicts come back as [`PdmError`](crate::error::PdmError) variants for the
//! caller to map onto its own status codes.

mod operations;
mod types;

#[cfg(test)]
mod tests;

pub use crate::store::MAX_MESSAGE_LEN;
pub use operations::{MIN_USER_LEN, PdmService};
pub use types::{FileState, FileStatus};
