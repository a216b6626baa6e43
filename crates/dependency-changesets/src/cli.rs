use std::path::PathBuf;

use changeset_operations::{EventContext, RunInput};
use clap::Parser;
use secrecy::SecretString;

use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "dependency-changesets")]
#[command(version)]
#[command(
    about = "Record the dependency updates of a pull request as changesets",
    long_about = None
)]
pub(crate) struct Cli {
    /// Token used to fetch base manifests and push to the pull request branch
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub(crate) event_path: Option<PathBuf>,

    /// Repository as `<owner>/<repo>`
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub(crate) repository: Option<String>,

    /// Home directory receiving the git credential file
    #[arg(long, env = "HOME")]
    pub(crate) home: Option<PathBuf>,

    /// Path to start project discovery from (default: current directory)
    #[arg(long = "path", short = 'C')]
    pub(crate) path: Option<PathBuf>,

    /// Base commit to compare against, overriding the event payload
    #[arg(long)]
    pub(crate) base_sha: Option<String>,

    /// Pull request branch, overriding the event payload
    #[arg(long, env = "GITHUB_HEAD_REF")]
    pub(crate) head_branch: Option<String>,

    /// Pull request number, overriding the event payload
    #[arg(long)]
    pub(crate) pr_number: Option<u64>,

    /// Host serving raw file contents
    #[arg(long, env = "MANIFEST_BASE_URL")]
    pub(crate) manifest_base_url: Option<String>,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT", hide = true)]
    pub(crate) github_output: Option<PathBuf>,

    /// Write changesets without committing or pushing
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v')]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Gathers everything the run needs, reading the event payload if one
    /// was given.
    pub(crate) fn run_input(&self) -> Result<RunInput> {
        let working_dir = match &self.path {
            Some(path) => path.clone(),
            None => std::env::current_dir().map_err(CliError::CurrentDir)?,
        };

        let event = match &self.event_path {
            Some(path) => EventContext::load(path).map_err(CliError::Configuration)?,
            None => EventContext::default(),
        };

        Ok(RunInput {
            token: self.token.clone().map(SecretString::from),
            repository: self.repository.clone(),
            home: self.home.clone(),
            working_dir,
            base_sha: self.base_sha.clone(),
            head_branch: self.head_branch.clone(),
            pr_number: self.pr_number,
            event,
            manifest_base_url: self.manifest_base_url.clone(),
            dry_run: self.dry_run,
        })
    }
}
