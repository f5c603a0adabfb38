//! Lock state store for pdm.
//!
//! This module owns the control file: a single JSON object mapping each
//! checked-out filename to its lock record.
//!
//! # Control File
//!
//! ```json
//! {
//!   "4806148.mcam": {
//!     "user": "mmclean",
//!     "timestamp": "2024-05-01T14:03:22.512Z",
//!     "message": "edit gear"
//!   }
//! }
//! ```
//!
//! A missing or empty file means no file is checked out.
//!
//! # Concurrency
//!
//! Every read and every write happens while holding an exclusive
//! [`LockedFile`](crate::lockfile::LockedFile) on the control file. Mutations
//! (`acquire`, `release`, `force_release`) read, decide and write through one
//! locked handle, so two workers can never both win the same filename. The
//! table is never cached between calls.

mod operations;
mod record;


pub use operations::LockStore;
pub use record::{LockRecord, LockTable, MAX_MESSAGE_LEN, validate_message};
