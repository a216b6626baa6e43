mod changeset_io;
mod git_provider;
mod manifest_fetcher;
mod project_provider;

pub use changeset_io::ChangesetWriter;
pub use git_provider::GitProvider;
pub use manifest_fetcher::{ManifestFetcher, ManifestLocation};
pub use project_provider::ProjectProvider;
