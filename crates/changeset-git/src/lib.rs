mod error;
mod netrc;
mod repository;
mod types;

pub use error::GitError;
pub use netrc::write_netrc;
pub use repository::Repository;
pub use types::{CommitInfo, Credentials, Identity};

pub type Result<T> = std::result::Result<T, GitError>;

pub const DEFAULT_REMOTE: &str = "origin";
