use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("no package.json found traversing from '{start_dir}'")]
    NotFound { start_dir: PathBuf },

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse workspace file at '{path}'")]
    WorkspaceParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("manifest at '{path}' missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read changesets config at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changesets config at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create changeset directory '{path}'")]
    ChangesetDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
