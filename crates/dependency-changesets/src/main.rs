mod cli;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use changeset_operations::RunConfig;
use changeset_operations::operations::SyncOperation;
use changeset_operations::providers::{
    FileSystemChangesetIO, FileSystemProjectProvider, Git2Provider, HttpManifestFetcher,
};
use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::error::{CliError, Result, error_messages, workflow_error_command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    let config = RunConfig::try_from(cli.run_input()?).map_err(CliError::Configuration)?;
    info!(
        repository = %config.repository,
        pr = config.pr_number,
        base = %config.base_sha,
        branch = %config.head_branch,
        dry_run = config.dry_run,
        "updating dependency changesets"
    );

    let fetcher = HttpManifestFetcher::with_base_url(&config.token, &config.manifest_base_url)?;
    let operation = SyncOperation::new(
        fetcher,
        FileSystemProjectProvider::new(),
        Git2Provider::new(),
        FileSystemChangesetIO::new(),
    );

    let outcome = operation.execute(&config)?;
    output::log_summary(&outcome);

    if let Some(path) = &cli.github_output {
        output::write_action_outputs(path, &outcome)?;
    }
    Ok(())
}

fn print_error(error: &CliError) {
    let mut messages = error_messages(error).into_iter();
    if let Some(message) = messages.next() {
        eprintln!("error: {message}");
    }
    for cause in messages {
        eprintln!("caused by: {cause}");
    }

    println!("{}", workflow_error_command(error));
}
