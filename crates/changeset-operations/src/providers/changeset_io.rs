use std::fs;
use std::path::Path;

use changeset_project::ensure_changeset_dir;

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangesetWriter;

/// Reads and writes changeset files on the local filesystem.
pub struct FileSystemChangesetIO;

impl FileSystemChangesetIO {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangesetIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetWriter for FileSystemChangesetIO {
    fn read_changeset(&self, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }

        fs::read_to_string(path)
            .map(Some)
            .map_err(|source| OperationError::ChangesetFileRead {
                path: path.to_path_buf(),
                source,
            })
    }

    fn ensure_dir(&self, changeset_dir: &Path) -> Result<()> {
        Ok(ensure_changeset_dir(changeset_dir)?)
    }

    fn write_changeset(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| OperationError::ChangesetFileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    fn remove_changeset(&self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(OperationError::ChangesetFileDelete {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
