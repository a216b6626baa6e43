mod changeset_io;
mod git;
mod http;
mod project;

pub use changeset_io::FileSystemChangesetIO;
pub use git::{CREDENTIAL_MACHINE, CREDENTIAL_USERNAME, Git2Provider};
pub use http::HttpManifestFetcher;
pub use project::FileSystemProjectProvider;
