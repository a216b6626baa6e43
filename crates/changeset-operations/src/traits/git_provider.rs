use std::path::{Path, PathBuf};

use changeset_git::{CommitInfo, Identity};
use secrecy::SecretString;

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Writes a credential file under `home` for the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn install_credentials(&self, home: &Path, token: &SecretString) -> Result<PathBuf>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or its config written.
    fn configure_identity(&self, repo_path: &Path, identity: Identity<'_>) -> Result<()>;

    /// Location of `path` relative to the root of the repository containing
    /// `repo_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn relative_to_root(&self, repo_path: &Path, path: &Path) -> Result<Option<PathBuf>>;

    /// Fetches `branch` from the remote and checks it out at the remote tip.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the branch cannot be checked out.
    fn sync_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or status check fails.
    fn is_working_tree_clean(&self, repo_path: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if staging fails.
    fn stage_all(&self, repo_path: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, repo_path: &Path, message: &str) -> Result<CommitInfo>;

    /// # Errors
    ///
    /// Returns an error if the push fails or is rejected.
    fn push_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()>;
}
