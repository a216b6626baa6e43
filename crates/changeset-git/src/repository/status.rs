use crate::Result;

use super::Repository;

impl Repository {
    #[cfg(test)]
    pub(crate) fn current_branch(&self) -> anyhow::Result<String> {
        let head = self.inner.head()?;
        anyhow::ensure!(head.is_branch(), "HEAD is detached");

        head.shorthand()
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("branch name is not utf-8"))
    }

    /// Whether there is nothing to commit: no staged, unstaged or untracked
    /// changes. Ignored files do not count.
    ///
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn is_working_tree_clean(&self) -> Result<bool> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .include_ignored(false)
                .recurse_untracked_dirs(true),
        ))?;

        Ok(statuses.is_empty())
    }
}
