//! Repository of checkout-able files.
//!
//! The repository is a flat directory. Only regular files directly under the
//! root whose extension is in the allowed set are visible; anything else
//! (subdirectories, other extensions, names that would escape the root) is
//! treated as absent.
//!
//! Lock records are keyed by filename, so a name only counts as present when
//! a directory entry is spelled exactly that way. On case-insensitive
//! filesystems `A.MCAM` would otherwise open `a.mcam` and get a second lock
//! record for the same file.

use crate::error::{PdmError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Size and modification time of a repository file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Read-only view of the repository directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
    allowed_extensions: Vec<String>,
}

impl FileRepository {
    /// Open the repository at `root`, creating the directory if needed.
    ///
    /// Extensions are matched case-insensitively and without a leading dot.
    pub fn open<P, I, S>(root: P, allowed_extensions: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| PdmError::repository_io(&root, e))?;

        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .collect();

        Ok(Self {
            root,
            allowed_extensions,
        })
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether `filename` is a plain name with an allowed extension.
    pub fn is_allowed(&self, filename: &str) -> bool {
        let path = Path::new(filename);
        let mut components = path.components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name || filename.contains(['/', '\\']) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.allowed_extensions.contains(&e))
    }

    /// Check whether `filename` exists in the repository.
    ///
    /// Stat failures other than absence are treated as absent; use
    /// [`metadata`](Self::metadata) to see them.
    pub fn exists(&self, filename: &str) -> bool {
        self.metadata(filename).is_ok()
    }

    /// Get size and modification time of `filename`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileMetadata)` - File exists and is visible
    /// * `Err(PdmError::FileNotFound)` - Not visible in the repository
    /// * `Err(PdmError::RepositoryIo)` - Stat failed for another reason
    pub fn metadata(&self, filename: &str) -> Result<FileMetadata> {
        if !self.is_allowed(filename) {
            return Err(PdmError::FileNotFound(filename.to_string()));
        }

        let metadata = self.stat(filename)?;
        if !self.has_exact_entry(filename)? {
            return Err(PdmError::FileNotFound(filename.to_string()));
        }
        Ok(metadata)
    }

    /// List visible files with their metadata, sorted by name.
    ///
    /// Files removed between the directory scan and the stat are skipped.
    pub fn list_with_metadata(&self) -> Result<Vec<(String, FileMetadata)>> {
        let mut files = Vec::new();
        for name in self.list()? {
            match self.stat(&name) {
                Ok(metadata) => files.push((name, metadata)),
                Err(PdmError::FileNotFound(_)) => {
                    warn!(filename = %name, "file disappeared while listing");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(files)
    }

    fn stat(&self, filename: &str) -> Result<FileMetadata> {
        let path = self.root.join(filename);
        let meta = match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Err(PdmError::FileNotFound(filename.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PdmError::FileNotFound(filename.to_string()));
            }
            Err(e) => return Err(PdmError::repository_io(path, e)),
        };

        let modified = meta
            .modified()
            .map_err(|e| PdmError::repository_io(&path, e))?;

        Ok(FileMetadata {
            size: meta.len(),
            modified: DateTime::<Utc>::from(modified),
        })
    }

    fn has_exact_entry(&self, filename: &str) -> Result<bool> {
        let entries = fs::read_dir(&self.root).map_err(|e| PdmError::repository_io(&self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| PdmError::repository_io(&self.root, e))?;
            if entry.file_name().as_os_str() == OsStr::new(filename) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// List visible filenames, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| PdmError::repository_io(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PdmError::repository_io(&self.root, e))?;

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file && self.is_allowed(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
