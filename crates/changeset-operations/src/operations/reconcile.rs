use std::path::{Path, PathBuf};

use tracing::debug;

use crate::traits::ChangesetWriter;
use crate::{ArtifactReport, ChangesetArtifact, ReconcileAction, Result};

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`, so
/// `@scope/pkg` becomes `_scope_pkg`.
#[must_use]
pub fn sanitize_package_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[must_use]
pub fn changeset_file_name(package_name: &str, pr_number: u64) -> String {
    format!(
        "{}-{pr_number}-dependencies.md",
        sanitize_package_name(package_name)
    )
}

/// `<changeset_dir>/<sanitized name>-<pr>-dependencies.md`
#[must_use]
pub fn changeset_path(changeset_dir: &Path, package_name: &str, pr_number: u64) -> PathBuf {
    changeset_dir.join(changeset_file_name(package_name, pr_number))
}

/// Keeps the per-package changeset file of a pull request in line with the
/// latest rendering.
pub struct ChangesetReconciler<W> {
    writer: W,
}

impl<W> ChangesetReconciler<W>
where
    W: ChangesetWriter,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `artifact` to the package's file, or deletes the file when
    /// there is no artifact. Identical content is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be read, written or deleted.
    pub fn reconcile(
        &self,
        changeset_dir: &Path,
        package_name: &str,
        pr_number: u64,
        artifact: Option<&ChangesetArtifact>,
    ) -> Result<ArtifactReport> {
        let path = changeset_path(changeset_dir, package_name, pr_number);

        let action = match artifact {
            None => {
                if self.writer.remove_changeset(&path)? {
                    ReconcileAction::Deleted
                } else {
                    ReconcileAction::AlreadyAbsent
                }
            }
            Some(artifact) => {
                self.writer.ensure_dir(changeset_dir)?;
                let existing = self.writer.read_changeset(&path)?;
                if existing.as_deref() == Some(artifact.content.as_str()) {
                    ReconcileAction::Unchanged
                } else {
                    self.writer.write_changeset(&path, &artifact.content)?;
                    ReconcileAction::Written
                }
            }
        };

        debug!(package = package_name, path = %path.display(), %action, "reconciled changeset");

        Ok(ArtifactReport {
            package_name: package_name.to_string(),
            path,
            action,
        })
    }
}
