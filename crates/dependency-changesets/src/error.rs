use std::path::PathBuf;

use changeset_operations::OperationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid run configuration")]
    Configuration(#[source] OperationError),

    #[error("failed to update dependency changesets")]
    Sync(#[from] OperationError),

    #[error("failed to write action output to '{path}'")]
    ActionOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;

/// The error and each of its causes, outermost first.
pub(crate) fn error_messages(error: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages
}

/// An `::error::` workflow command carrying the whole chain on one line.
pub(crate) fn workflow_error_command(error: &dyn std::error::Error) -> String {
    let message = error_messages(error).join(": ");
    format!("::error::{}", escape_workflow_data(&message))
}

fn escape_workflow_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
