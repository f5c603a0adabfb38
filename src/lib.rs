//! pdm: checkout/checkin lock manager for a shared document repository.
//!
//! A user checks a file out to hold an exclusive lock on it and checks it back
//! in when done. Lock state is a single JSON control file guarded by an OS
//! advisory lock, so any number of threads and processes on one host can share
//! it safely.
//!
//! ```no_run
//! use pdm::repository::FileRepository;
//! use pdm::service::PdmService;
//! use pdm::store::LockStore;
//!
//! let store = LockStore::open("locks.json")?;
//! let repository = FileRepository::open("repo", ["mcam"])?;
//! let service = PdmService::new(store, repository);
//!
//! service.checkout("4806148.mcam", "mmclean", "edit gear")?;
//! service.checkin("4806148.mcam", "mmclean")?;
//! # Ok::<(), pdm::error::PdmError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod lockfile;
pub mod logging;
pub mod repository;
pub mod service;
pub mod store;
