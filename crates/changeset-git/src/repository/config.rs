use tracing::debug;

use crate::{Identity, Result};

use super::Repository;

impl Repository {
    /// Sets `user.name` and `user.email` in the repository's local config.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be opened or written.
    pub fn configure_identity(&self, identity: Identity<'_>) -> Result<()> {
        let mut config = self.inner.config()?.open_level(git2::ConfigLevel::Local)?;
        config.set_str("user.name", identity.name)?;
        config.set_str("user.email", identity.email)?;

        debug!(name = identity.name, email = identity.email, "configured commit identity");
        Ok(())
    }
}
