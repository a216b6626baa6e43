use changeset_core::Changeset;

use crate::error::FormatError;
use crate::parse::parse_changeset;
use crate::serialize::serialize_changeset;

/// Rewrites a changeset document into its canonical layout.
///
/// The front matter is re-emitted from its parsed form. In the body, trailing
/// whitespace is stripped, runs of blank lines collapse to one, and the
/// document ends with exactly one newline. Formatting an already formatted
/// document returns it unchanged.
///
/// # Errors
///
/// Returns a [`FormatError`] if the document cannot be parsed as a changeset.
pub fn format_changeset(content: &str) -> Result<String, FormatError> {
    let changeset = parse_changeset(content)?;

    serialize_changeset(&Changeset {
        summary: normalize_markdown(&changeset.summary),
        releases: changeset.releases,
    })
}

fn normalize_markdown(body: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;

    for line in body.lines() {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(line);
        previous_blank = blank;
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
