//! Exit code constants for the pdm CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config or request)
//! - 2: File not found in the repository
//! - 3: File already checked out
//! - 4: File not checked out
//! - 5: Checked out by someone else
//! - 6: Lock store I/O failure
//! - 7: Repository I/O failure
//! - 8: Internal error (output could not be produced)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid request fields, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Checkout target is not present in the repository.
pub const FILE_NOT_FOUND: i32 = 2;

/// Checkout target already has a lock record.
pub const ALREADY_LOCKED: i32 = 3;

/// Checkin target has no lock record.
pub const NOT_LOCKED: i32 = 4;

/// Checkin requested by a user who does not own the lock.
pub const NOT_OWNER: i32 = 5;

/// The control file could not be read or written.
pub const STORE_IO_FAILURE: i32 = 6;

/// A repository file or directory could not be inspected.
pub const REPOSITORY_IO_FAILURE: i32 = 7;

/// Internal failure unrelated to user input, such as output serialization.
pub const INTERNAL_ERROR: i32 = 8;
