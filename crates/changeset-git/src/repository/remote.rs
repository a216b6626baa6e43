use tracing::debug;

use crate::{Credentials, GitError, Result};

use super::Repository;

fn remote_callbacks(credentials: Option<Credentials<'_>>) -> git2::RemoteCallbacks<'_> {
    let mut callbacks = git2::RemoteCallbacks::new();
    if let Some(credentials) = credentials {
        callbacks.credentials(move |_url, _username, allowed| {
            if allowed.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                git2::Cred::userpass_plaintext(credentials.username, credentials.password)
            } else {
                git2::Cred::default()
            }
        });
    }
    callbacks
}

impl Repository {
    fn find_remote(&self, name: &str) -> Result<git2::Remote<'_>> {
        self.inner
            .find_remote(name)
            .map_err(|_| GitError::RemoteNotFound {
                name: name.to_string(),
            })
    }

    /// Fetches `branch` of `remote_name` into `refs/remotes/<remote>/<branch>`.
    ///
    /// Only that branch is requested: a wildcard fetch fails in depth-1
    /// checkouts whose other refs lack their history.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RemoteNotFound`] if the remote is not configured,
    /// or a git error if the transfer fails.
    pub fn fetch_branch(
        &self,
        remote_name: &str,
        branch: &str,
        credentials: Option<Credentials<'_>>,
    ) -> Result<()> {
        let mut remote = self.find_remote(remote_name)?;

        let mut options = git2::FetchOptions::new();
        options.remote_callbacks(remote_callbacks(credentials));

        let refspec = format!("+refs/heads/{branch}:refs/remotes/{remote_name}/{branch}");
        remote.fetch(&[refspec.as_str()], Some(&mut options), None)?;

        debug!(remote = remote_name, branch, "fetched");
        Ok(())
    }

    /// Pushes the local `branch` to the branch of the same name on `remote_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote is missing, the transfer fails, or the
    /// remote rejects the update.
    pub fn push_branch(
        &self,
        remote_name: &str,
        branch: &str,
        credentials: Option<Credentials<'_>>,
    ) -> Result<()> {
        let mut remote = self.find_remote(remote_name)?;

        let mut callbacks = remote_callbacks(credentials);
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {refname}: {message}"
            ))),
            None => Ok(()),
        });

        let mut options = git2::PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], Some(&mut options))?;

        debug!(remote = remote_name, branch, "pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_on_remote, setup_repo_with_remote, setup_test_repo};
    use crate::{DEFAULT_REMOTE, GitError};
    use std::fs;

    #[test]
    fn fetch_without_remote_fails() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.fetch_branch(DEFAULT_REMOTE, "main", None);

        assert!(matches!(result, Err(GitError::RemoteNotFound { .. })));
        Ok(())
    }

    #[test]
    fn fetch_updates_remote_tracking_ref_of_branch() -> anyhow::Result<()> {
        let (remote_dir, _dir, repo) = setup_repo_with_remote()?;
        let base = repo.inner.head()?.peel_to_commit()?.id();
        let remote_tip = commit_on_remote(remote_dir.path(), "feature", base, "a.txt", "a")?;

        repo.fetch_branch(DEFAULT_REMOTE, "feature", None)?;

        let tracking = repo
            .inner
            .find_reference("refs/remotes/origin/feature")?
            .peel_to_commit()?;
        assert_eq!(tracking.id(), remote_tip);
        Ok(())
    }

    #[test]
    fn fetch_leaves_other_branches_alone() -> anyhow::Result<()> {
        let (remote_dir, _dir, repo) = setup_repo_with_remote()?;
        let base = repo.inner.head()?.peel_to_commit()?.id();
        commit_on_remote(remote_dir.path(), "feature", base, "a.txt", "a")?;
        commit_on_remote(remote_dir.path(), "other", base, "b.txt", "b")?;

        repo.fetch_branch(DEFAULT_REMOTE, "feature", None)?;

        assert!(repo.inner.find_reference("refs/remotes/origin/feature").is_ok());
        assert!(repo.inner.find_reference("refs/remotes/origin/other").is_err());
        Ok(())
    }

    #[test]
    fn push_branch_updates_remote() -> anyhow::Result<()> {
        let (remote_dir, dir, repo) = setup_repo_with_remote()?;
        let branch = repo.current_branch()?;

        fs::write(dir.path().join("file.txt"), "content")?;
        repo.stage_all()?;
        let commit = repo.commit("Add file")?;

        repo.push_branch(DEFAULT_REMOTE, &branch, None)?;

        let bare = git2::Repository::open_bare(remote_dir.path())?;
        let remote_tip = bare
            .find_reference(&format!("refs/heads/{branch}"))?
            .peel_to_commit()?;
        assert_eq!(remote_tip.id().to_string(), commit.sha);
        Ok(())
    }

    #[test]
    fn push_of_missing_branch_fails() -> anyhow::Result<()> {
        let (_remote_dir, _dir, repo) = setup_repo_with_remote()?;

        let result = repo.push_branch(DEFAULT_REMOTE, "does-not-exist", None);

        assert!(result.is_err());
        Ok(())
    }
}
