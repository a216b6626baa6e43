use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{OperationError, Result};

pub const DEFAULT_MANIFEST_BASE_URL: &str = "https://raw.githubusercontent.com";

/// `<owner>/<repo>` coordinates of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositorySlug {
    type Err = OperationError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || OperationError::InvalidRepository {
            value: value.to_string(),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The fields of a GitHub webhook event payload this tool reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub base_sha: Option<String>,
    pub head_branch: Option<String>,
    pub number: Option<u64>,
    pub repository: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvent {
    pull_request: Option<RawPullRequest>,
    issue: Option<RawIssue>,
    number: Option<u64>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPullRequest {
    number: Option<u64>,
    base: Option<RawRef>,
    head: Option<RawRef>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRef {
    sha: Option<String>,
    #[serde(rename = "ref")]
    git_ref: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIssue {
    number: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRepository {
    full_name: Option<String>,
}

impl EventContext {
    /// Extracts the pull request context from an event payload.
    ///
    /// The number is taken from `pull_request.number`, then `issue.number`,
    /// then the top-level `number`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: RawEvent = serde_json::from_str(content)?;
        let pull_request = raw.pull_request.unwrap_or_default();

        let number = pull_request
            .number
            .or_else(|| raw.issue.and_then(|issue| issue.number))
            .or(raw.number);

        Ok(Self {
            base_sha: pull_request.base.and_then(|base| base.sha),
            head_branch: pull_request.head.and_then(|head| head.git_ref),
            number,
            repository: raw.repository.and_then(|repo| repo.full_name),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| OperationError::EventRead {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&content).map_err(|source| OperationError::EventParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Unvalidated run settings gathered at the process boundary.
///
/// Explicit values take precedence over those found in `event`.
#[derive(Debug, Default)]
pub struct RunInput {
    pub token: Option<SecretString>,
    pub repository: Option<String>,
    pub home: Option<PathBuf>,
    pub working_dir: PathBuf,
    pub base_sha: Option<String>,
    pub head_branch: Option<String>,
    pub pr_number: Option<u64>,
    pub event: EventContext,
    pub manifest_base_url: Option<String>,
    pub dry_run: bool,
}

/// Validated settings for one run.
#[derive(Debug)]
pub struct RunConfig {
    pub token: SecretString,
    pub repository: RepositorySlug,
    pub base_sha: String,
    pub head_branch: String,
    pub pr_number: u64,
    pub working_dir: PathBuf,
    /// Where the credential file goes. Without it no file is written.
    pub home: Option<PathBuf>,
    pub manifest_base_url: String,
    pub dry_run: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<RunInput> for RunConfig {
    type Error = OperationError;

    fn try_from(input: RunInput) -> Result<Self> {
        let token = input
            .token
            .filter(|token| !token.expose_secret().trim().is_empty())
            .ok_or(OperationError::MissingToken)?;

        let base_sha = non_empty(input.base_sha)
            .or(non_empty(input.event.base_sha))
            .ok_or(OperationError::MissingBaseSha)?;

        let pr_number = input
            .pr_number
            .or(input.event.number)
            .ok_or(OperationError::MissingPullRequestNumber)?;

        let head_branch = non_empty(input.head_branch)
            .or(non_empty(input.event.head_branch))
            .ok_or(OperationError::MissingHeadBranch)?;

        let repository = non_empty(input.repository)
            .or(non_empty(input.event.repository))
            .ok_or(OperationError::MissingRepository)?
            .parse()?;

        let manifest_base_url = non_empty(input.manifest_base_url)
            .unwrap_or_else(|| DEFAULT_MANIFEST_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token,
            repository,
            base_sha,
            head_branch,
            pr_number,
            working_dir: input.working_dir,
            home: input.home,
            manifest_base_url,
            dry_run: input.dry_run,
        })
    }
}
