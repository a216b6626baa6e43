use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, Changeset, PackageRelease};

use crate::error::{FormatError, FrontMatterError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct ReleasesMap {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, BumpType>,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches('\r') == FRONT_MATTER_DELIMITER
}

/// Splits a document into its YAML front matter and markdown body.
fn split_front_matter(content: &str) -> Result<(String, &str), FormatError> {
    let trimmed = content.trim_start();
    let mut lines = trimmed.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_delimiter(first.trim_end_matches('\n')) => {}
        _ => return Err(FrontMatterError::MissingOpeningDelimiter.into()),
    }

    let mut yaml = String::new();
    let mut consumed = trimmed.len() - lines.clone().map(str::len).sum::<usize>();

    for line in lines {
        consumed += line.len();
        if is_delimiter(line.trim_end_matches('\n')) {
            if yaml.trim().is_empty() {
                return Err(FrontMatterError::EmptyFrontMatter.into());
            }
            return Ok((yaml, &trimmed[consumed..]));
        }
        yaml.push_str(line.trim_end_matches(['\r', '\n']));
        yaml.push('\n');
    }

    Err(FrontMatterError::MissingClosingDelimiter.into())
}

/// # Errors
///
/// Returns a [`FormatError`] if the front matter is missing, is not a YAML
/// mapping of package names to bump types, or names no package.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml, body) = split_front_matter(content)?;
    let parsed: ReleasesMap = serde_yml::from_str(&yaml)?;

    if parsed.releases.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    let releases = parsed
        .releases
        .into_iter()
        .map(|(name, bump_type)| PackageRelease { name, bump_type })
        .collect();

    Ok(Changeset {
        summary: body.trim().to_string(),
        releases,
    })
}
