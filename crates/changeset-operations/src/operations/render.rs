use std::sync::LazyLock;

use changeset_core::{
    BumpType, Changeset, DependencyField, FieldChange, PackageChangeSet, PackageRelease,
};
use changeset_parse::{FormatError, format_changeset, serialize_changeset};
use regex::Regex;
use tracing::warn;

use crate::{ChangesetArtifact, Result};

pub const SUMMARY_HEADING: &str = "dependencies updates:";

const NPM_PACKAGE_URL: &str = "https://www.npmjs.com/package";
const LINK_MARKER: &str = "\u{2197}\u{fe0e}";

// Same shape as npm's `semver.coerce`: the first run of up to three
// dot-separated numbers not embedded in a longer number.
static COERCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("coerce pattern is valid")
});

/// Reduces a version range such as `^4.17.21` or `~1.2` to a plain version.
#[must_use]
pub fn coerce_version(specifier: &str) -> Option<String> {
    let captures = COERCE_REGEX.captures(specifier)?;
    let component = |index: usize| -> Option<u64> {
        captures
            .get(index)
            .map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let version = semver::Version::new(component(1)?, component(2)?, component(3)?);
    Some(version.to_string())
}

#[must_use]
pub fn npm_link(name: &str, specifier: &str) -> String {
    let version = coerce_version(specifier).unwrap_or_else(|| specifier.to_string());
    format!("{NPM_PACKAGE_URL}/{name}/v/{version}")
}

/// One markdown line for a change, without the list marker.
#[must_use]
pub fn render_change(field: DependencyField, change: &FieldChange) -> String {
    let name = change.key();
    let version = change.version();
    let link = format!(
        "[{name}@{version} {LINK_MARKER}]({})",
        npm_link(name, version)
    );

    match change {
        FieldChange::Add { .. } => format!("Added dependency {link} (to `{field}`)"),
        FieldChange::Update(update) => format!(
            "Updated dependency {link} (from `{}`, in `{field}`)",
            update.old_value()
        ),
        FieldChange::Remove { .. } => format!("Removed dependency {link} (from `{field}`)"),
    }
}

/// The bullet list for a package, `dependencies` first.
#[must_use]
pub fn render_summary(changes: &PackageChangeSet) -> String {
    changes
        .changes()
        .map(|(field, change)| format!("- {}", render_change(field, change)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the changeset for a package, or `None` when there is nothing to
/// report and any existing file should go.
///
/// The document is passed through the changeset formatter. If formatting
/// fails the unformatted document is kept.
///
/// # Errors
///
/// Returns an error if the front matter cannot be serialized.
pub fn render_changeset(changes: &PackageChangeSet) -> Result<Option<ChangesetArtifact>> {
    render_with_formatter(changes, format_changeset)
}

fn render_with_formatter<F>(
    changes: &PackageChangeSet,
    format: F,
) -> Result<Option<ChangesetArtifact>>
where
    F: FnOnce(&str) -> std::result::Result<String, FormatError>,
{
    if changes.is_empty() {
        return Ok(None);
    }

    let changeset = Changeset {
        summary: format!("{SUMMARY_HEADING}\n\n{}", render_summary(changes)),
        releases: vec![PackageRelease {
            name: changes.package_name.clone(),
            bump_type: BumpType::Patch,
        }],
    };

    let unformatted = serialize_changeset(&changeset)?;
    let content = match format(&unformatted) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(
                package = %changes.package_name,
                error = %e,
                "formatting failed, keeping unformatted changeset"
            );
            unformatted
        }
    };

    Ok(Some(ChangesetArtifact { changeset, content }))
}
