use changeset_core::DependencyManifest;

use crate::{RepositorySlug, Result};

/// A file in a hosted repository at a given commit or branch.
#[derive(Debug, Clone, Copy)]
pub struct ManifestLocation<'a> {
    pub repository: &'a RepositorySlug,
    pub git_ref: &'a str,
    /// Repository-relative path with `/` separators.
    pub path: &'a str,
}

pub trait ManifestFetcher: Send + Sync {
    /// Retrieves the manifest as it was at `location.git_ref`.
    ///
    /// Returns `Ok(None)` when the file does not exist at that ref.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, unexpected statuses, or a body
    /// that is not a package manifest.
    fn fetch_manifest(&self, location: ManifestLocation<'_>)
    -> Result<Option<DependencyManifest>>;
}
