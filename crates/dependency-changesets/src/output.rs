use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use changeset_operations::{ReconcileAction, SyncOutcome};
use tracing::info;

use crate::error::{CliError, Result};

/// One closing line; per-package details are logged while the run happens.
pub(crate) fn log_summary(outcome: &SyncOutcome) {
    let count = |action: ReconcileAction| {
        outcome
            .artifacts
            .iter()
            .filter(|report| report.action == action)
            .count()
    };

    info!(
        written = count(ReconcileAction::Written),
        unchanged = count(ReconcileAction::Unchanged),
        deleted = count(ReconcileAction::Deleted),
        skipped = outcome.skipped.len(),
        changed = outcome.publish.has_changes(),
        "dependency changesets up to date"
    );
}

/// `key=value` lines in the step output format.
pub(crate) fn action_outputs(outcome: &SyncOutcome) -> String {
    format!("changed={}\n", outcome.publish.has_changes())
}

/// Appends the step outputs to the file the runner collects them from.
pub(crate) fn write_action_outputs(path: &Path, outcome: &SyncOutcome) -> Result<()> {
    let to_error = |source| CliError::ActionOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    file.write_all(action_outputs(outcome).as_bytes())
        .map_err(to_error)
}
