use crate::Result;

use super::Repository;

impl Repository {
    /// Stages every change in the working tree, including deletions.
    ///
    /// # Errors
    ///
    /// Returns an error if the staging operation fails.
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.inner.index()?;

        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        Ok(())
    }
}
