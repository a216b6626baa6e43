use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChangesetError, Result};

/// Dependency name to version specifier.
///
/// Specifiers are kept verbatim; they may be ranges, tags or protocols such as
/// `workspace:*`. The map is ordered so that everything derived from it is
/// deterministic.
pub type VersionMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelease {
    pub name: String,
    pub bump_type: BumpType,
}

/// A release note as understood by the changesets release tool: front matter
/// naming the packages to release, followed by a markdown summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub summary: String,
    pub releases: Vec<PackageRelease>,
}

/// The manifest field a change was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyField {
    Dependencies,
    PeerDependencies,
}

impl DependencyField {
    pub const ALL: [Self; 2] = [Self::Dependencies, Self::PeerDependencies];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::PeerDependencies => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub name: String,
    pub directory: PathBuf,
    /// Manifest path relative to the repository root, used to address the
    /// file on the remote host.
    pub manifest_relative_path: PathBuf,
    pub is_private: bool,
}

impl PackageRef {
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join("package.json")
    }
}

/// A version change that is guaranteed to differ on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    key: String,
    value: String,
    old_value: String,
}

impl VersionUpdate {
    /// # Errors
    ///
    /// Returns [`ChangesetError::UnchangedUpdate`] if `value` equals `old_value`.
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        old_value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        let old_value = old_value.into();

        if value == old_value {
            return Err(ChangesetError::UnchangedUpdate { key, value });
        }

        Ok(Self {
            key,
            value,
            old_value,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Add { key: String, value: String },
    Update(VersionUpdate),
    Remove { key: String, old_value: String },
}

impl FieldChange {
    #[must_use]
    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Add {
            key: key.into(),
            value: value.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ChangesetError::UnchangedUpdate`] if both versions are equal.
    pub fn update(
        key: impl Into<String>,
        value: impl Into<String>,
        old_value: impl Into<String>,
    ) -> Result<Self> {
        VersionUpdate::new(key, value, old_value).map(Self::Update)
    }

    #[must_use]
    pub fn remove(key: impl Into<String>, old_value: impl Into<String>) -> Self {
        Self::Remove {
            key: key.into(),
            old_value: old_value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Add { key, .. } | Self::Remove { key, .. } => key,
            Self::Update(update) => update.key(),
        }
    }

    /// The specifier the dependency is known by after this change, or the one
    /// it had before removal.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::Add { value, .. } => value,
            Self::Update(update) => update.value(),
            Self::Remove { old_value, .. } => old_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChangeSet {
    pub package_name: String,
    pub dependencies_changes: Vec<FieldChange>,
    pub peer_dependencies_changes: Vec<FieldChange>,
}

impl PackageChangeSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies_changes.is_empty() && self.peer_dependencies_changes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies_changes.len() + self.peer_dependencies_changes.len()
    }

    /// All changes, `dependencies` first, each tagged with its field.
    pub fn changes(&self) -> impl Iterator<Item = (DependencyField, &FieldChange)> {
        self.dependencies_changes
            .iter()
            .map(|c| (DependencyField::Dependencies, c))
            .chain(
                self.peer_dependencies_changes
                    .iter()
                    .map(|c| (DependencyField::PeerDependencies, c)),
            )
    }
}

/// The subset of `package.json` the differ looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: VersionMap,
    #[serde(default)]
    pub peer_dependencies: VersionMap,
}

impl DependencyManifest {
    /// # Errors
    ///
    /// Returns [`ChangesetError::ManifestParse`] if the content is not a JSON
    /// object with string-valued dependency maps.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    #[must_use]
    pub fn field(&self, field: DependencyField) -> &VersionMap {
        match field {
            DependencyField::Dependencies => &self.dependencies,
            DependencyField::PeerDependencies => &self.peer_dependencies,
        }
    }
}
