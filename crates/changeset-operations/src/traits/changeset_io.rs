use std::path::Path;

use crate::Result;

pub trait ChangesetWriter: Send + Sync {
    /// Current content of a changeset file, or `None` if there is no regular
    /// file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read_changeset(&self, path: &Path) -> Result<Option<String>>;

    /// Creates `changeset_dir` and its parents if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_dir(&self, changeset_dir: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_changeset(&self, path: &Path, content: &str) -> Result<()>;

    /// Deletes the changeset file, returning whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be deleted.
    fn remove_changeset(&self, path: &Path) -> Result<bool>;
}
