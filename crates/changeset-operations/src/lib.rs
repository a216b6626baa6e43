mod config;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use config::{
    DEFAULT_MANIFEST_BASE_URL, EventContext, RepositorySlug, RunConfig, RunInput,
};
pub use error::{OperationError, Result};
pub use types::{
    ArtifactReport, ChangesetArtifact, PackageSkip, PublishOutcome, ReconcileAction, SkipReason,
    SyncOutcome,
};
