use std::path::{Path, PathBuf};

use changeset_git::{CommitInfo, Credentials, DEFAULT_REMOTE, Identity, Repository, write_netrc};
use secrecy::{ExposeSecret, SecretString};

use crate::Result;
use crate::traits::GitProvider;

/// Host the credential file is written for.
pub const CREDENTIAL_MACHINE: &str = "github.com";
/// Login paired with the token in the credential file and for push and fetch.
pub const CREDENTIAL_USERNAME: &str = "github-actions[bot]";

fn credentials(token: &SecretString) -> Credentials<'_> {
    Credentials {
        username: CREDENTIAL_USERNAME,
        password: token.expose_secret(),
    }
}

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn install_credentials(&self, home: &Path, token: &SecretString) -> Result<PathBuf> {
        Ok(write_netrc(home, CREDENTIAL_MACHINE, credentials(token))?)
    }

    fn configure_identity(&self, repo_path: &Path, identity: Identity<'_>) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.configure_identity(identity)?)
    }

    fn relative_to_root(&self, repo_path: &Path, path: &Path) -> Result<Option<PathBuf>> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.relative_to_root(path))
    }

    fn sync_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        repo.fetch_branch(DEFAULT_REMOTE, branch, Some(credentials(token)))?;
        Ok(repo.checkout_tracking_branch(DEFAULT_REMOTE, branch)?)
    }

    fn is_working_tree_clean(&self, repo_path: &Path) -> Result<bool> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.is_working_tree_clean()?)
    }

    fn stage_all(&self, repo_path: &Path) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.stage_all()?)
    }

    fn commit(&self, repo_path: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.commit(message)?)
    }

    fn push_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        Ok(repo.push_branch(DEFAULT_REMOTE, branch, Some(credentials(token)))?)
    }
}
