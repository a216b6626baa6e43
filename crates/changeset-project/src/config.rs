use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::error::ProjectError;
use crate::{CONFIG_FILE_NAME, DEFAULT_CHANGESET_DIR};

/// The parts of `.changeset/config.json` that affect dependency changesets.
#[derive(Debug, Clone)]
pub struct ChangesetsConfig {
    ignore: GlobSet,
}

impl Default for ChangesetsConfig {
    fn default() -> Self {
        Self {
            ignore: GlobSet::empty(),
        }
    }
}

impl ChangesetsConfig {
    /// # Errors
    ///
    /// Returns [`ProjectError::GlobPattern`] if a pattern is not a valid glob.
    pub fn with_ignore<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ProjectError> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        Ok(Self {
            ignore: build_glob_set(&patterns)?,
        })
    }

    /// Whether a package is excluded by name or by a glob over names.
    #[must_use]
    pub fn is_ignored(&self, package_name: &str) -> bool {
        self.ignore.is_match(package_name)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    ignore: Vec<String>,
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Reads `<root>/.changeset/config.json`.
///
/// A missing file yields the default configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// `ignore` entry is not a valid glob.
pub fn load_changesets_config(root: &Path) -> Result<ChangesetsConfig, ProjectError> {
    let path = root.join(DEFAULT_CHANGESET_DIR).join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ChangesetsConfig::default());
        }
        Err(source) => return Err(ProjectError::ConfigRead { path, source }),
    };

    let raw: RawConfig =
        serde_json::from_str(&content).map_err(|source| ProjectError::ConfigParse {
            path: path.clone(),
            source,
        })?;

    ChangesetsConfig::with_ignore(&raw.ignore)
}
