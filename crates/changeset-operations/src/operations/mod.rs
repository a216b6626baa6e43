mod reconcile;
mod render;
mod sync;

pub use reconcile::{
    ChangesetReconciler, changeset_file_name, changeset_path, sanitize_package_name,
};
pub use render::{
    SUMMARY_HEADING, coerce_version, npm_link, render_change, render_changeset, render_summary,
};
pub use sync::{BOT_IDENTITY, COMMIT_MESSAGE, SyncOperation};
