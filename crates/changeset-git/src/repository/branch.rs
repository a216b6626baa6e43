use tracing::debug;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Checks out `branch` at the tip of `<remote_name>/<branch>`.
    ///
    /// The local branch is created when missing, or moved to the remote tip
    /// when it exists, and tracks the remote branch afterwards. The checkout
    /// refuses to overwrite uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the remote branch has not been
    /// fetched, or a git error if the checkout conflicts with local changes.
    pub fn checkout_tracking_branch(&self, remote_name: &str, branch: &str) -> Result<()> {
        let remote_ref = format!("{remote_name}/{branch}");
        let target = self
            .inner
            .find_branch(&remote_ref, git2::BranchType::Remote)
            .map_err(|_| GitError::RefNotFound {
                refspec: remote_ref.clone(),
            })?
            .get()
            .peel_to_commit()?;

        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.safe();
        self.inner
            .checkout_tree(target.as_object(), Some(&mut checkout))?;

        let mut local = match self.inner.find_branch(branch, git2::BranchType::Local) {
            Ok(mut local) => {
                if local.get().target() != Some(target.id()) {
                    local
                        .get_mut()
                        .set_target(target.id(), "reset to remote tip")?;
                }
                local
            }
            Err(_) => self.inner.branch(branch, &target, false)?,
        };
        local.set_upstream(Some(&remote_ref))?;

        self.inner.set_head(&format!("refs/heads/{branch}"))?;

        debug!(branch, commit = %target.id(), "checked out tracking branch");
        Ok(())
    }
}
