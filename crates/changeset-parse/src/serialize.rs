use std::fmt::Write as _;

use changeset_core::Changeset;

use crate::error::{FormatError, ValidationError};
use crate::parse::FRONT_MATTER_DELIMITER;

/// Renders the front matter block, one `"<name>": <bump>` line per release.
///
/// Names are always double-quoted so scoped names such as `@scope/pkg` stay
/// valid YAML keys.
pub(crate) fn render_front_matter(changeset: &Changeset) -> Result<String, FormatError> {
    if changeset.releases.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    for release in &changeset.releases {
        let quoted = serde_json::to_string(&release.name)?;
        let _ = writeln!(output, "{quoted}: {}", release.bump_type);
    }

    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    Ok(output)
}

/// # Errors
///
/// Returns [`ValidationError::NoReleases`] if the changeset releases nothing.
#[must_use = "serialization result should be handled"]
pub fn serialize_changeset(changeset: &Changeset) -> Result<String, FormatError> {
    let mut output = render_front_matter(changeset)?;

    if !changeset.summary.is_empty() {
        output.push('\n');
        output.push_str(&changeset.summary);
        output.push('\n');
    }

    Ok(output)
}
