use std::fmt;
use std::path::PathBuf;

use changeset_core::Changeset;

/// A rendered changeset ready to be written for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetArtifact {
    pub changeset: Changeset,
    /// The full document, front matter included.
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    Written,
    /// The file already held the rendered bytes.
    Unchanged,
    Deleted,
    /// Nothing to write and no file to delete.
    AlreadyAbsent,
}

impl fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Written => "written",
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
            Self::AlreadyAbsent => "absent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub package_name: String,
    pub path: PathBuf,
    pub action: ReconcileAction,
}

/// Why a package was left out of reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The manifest did not exist at the base commit.
    NoPriorManifest,
    FetchFailed(String),
    CurrentManifestUnreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPriorManifest => f.write_str("no manifest at the base commit"),
            Self::FetchFailed(message) => write!(f, "base manifest fetch failed: {message}"),
            Self::CurrentManifestUnreadable(message) => {
                write!(f, "current manifest unreadable: {message}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSkip {
    pub package_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The working tree had nothing to commit.
    Clean,
    Pushed { commit_sha: String },
    /// Commit and push were suppressed.
    DryRun { dirty: bool },
}

impl PublishOutcome {
    /// Whether the reconciled files differ from the branch tip.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Clean => false,
            Self::Pushed { .. } => true,
            Self::DryRun { dirty } => *dirty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub artifacts: Vec<ArtifactReport>,
    pub skipped: Vec<PackageSkip>,
    pub publish: PublishOutcome,
}
