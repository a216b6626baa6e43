use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangesetError {
    #[error("update of '{key}' must change its version, but both sides are '{value}'")]
    UnchangedUpdate { key: String, value: String },

    #[error("failed to parse package manifest")]
    ManifestParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChangesetError>;
