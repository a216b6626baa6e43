mod branch;
mod commit;
mod config;
mod remote;
mod staging;
mod status;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let root = inner.workdir().ok_or_else(|| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        // Use dunce to get a path without the \\?\ prefix on Windows
        let root = dunce::simplified(root).to_path_buf();

        Ok(Self { inner, root })
    }

    /// Location of `path` relative to the working tree root, or `None` when
    /// it lies outside the repository.
    #[must_use]
    pub fn relative_to_root(&self, path: &Path) -> Option<PathBuf> {
        let root = dunce::canonicalize(&self.root).ok()?;
        let path = dunce::canonicalize(path).ok()?;
        path.strip_prefix(root).ok().map(Path::to_path_buf)
    }
}
