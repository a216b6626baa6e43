use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("not a git repository: '{path}'")]
    NotARepository { path: PathBuf },

    #[error("failed to resolve reference '{refspec}'")]
    RefNotFound { refspec: String },

    #[error("remote '{name}' is not configured")]
    RemoteNotFound { name: String },

    #[error("failed to write credentials to '{path}'")]
    CredentialsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
