use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] changeset_core::ChangesetError),

    #[error(transparent)]
    Git(#[from] changeset_git::GitError),

    #[error(transparent)]
    Project(#[from] changeset_project::ProjectError),

    #[error(transparent)]
    Format(#[from] changeset_parse::FormatError),

    #[error("no access token available; set GITHUB_TOKEN or pass --token")]
    MissingToken,

    #[error("no pull request base commit SHA in the event payload")]
    MissingBaseSha,

    #[error("no pull request or issue number in the event payload")]
    MissingPullRequestNumber,

    #[error("no pull request head branch in the event payload")]
    MissingHeadBranch,

    #[error("no repository given; set GITHUB_REPOSITORY or pass --repository")]
    MissingRepository,

    #[error("invalid repository '{value}', expected '<owner>/<repo>'")]
    InvalidRepository { value: String },

    #[error("access token contains characters not allowed in an HTTP header")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),

    #[error("failed to read event payload '{path}'")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload '{path}'")]
    EventParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to fetch '{url}'")]
    ManifestFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} fetching '{url}'")]
    ManifestFetchStatus { url: String, status: u16 },

    #[error("response from '{url}' is not a package manifest")]
    ManifestFetchParse {
        url: String,
        #[source]
        source: changeset_core::ChangesetError,
    },

    #[error("failed to read manifest '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: changeset_core::ChangesetError,
    },

    #[error("failed to read changeset file '{path}'")]
    ChangesetFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changeset file '{path}'")]
    ChangesetFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete changeset file '{path}'")]
    ChangesetFileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
