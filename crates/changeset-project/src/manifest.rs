use std::path::Path;

use serde::Deserialize;

use crate::error::ProjectError;

pub(crate) const PACKAGE_JSON: &str = "package.json";
pub(crate) const PNPM_WORKSPACE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Deserialize)]
pub(crate) struct PackageJson {
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) private: bool,
    pub(crate) workspaces: Option<WorkspacesField>,
}

/// npm and yarn accept either a bare list or yarn's `{ "packages": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WorkspacesField {
    List(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    pub(crate) fn patterns(&self) -> &[String] {
        match self {
            Self::List(patterns) | Self::Object { packages: patterns } => patterns,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PnpmWorkspace {
    #[serde(default)]
    pub(crate) packages: Vec<String>,
}

pub(crate) fn read_package_json(path: &Path) -> Result<PackageJson, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProjectError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_pnpm_workspace(path: &Path) -> Result<PnpmWorkspace, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yml::from_str(&content).map_err(|source| ProjectError::WorkspaceParse {
        path: path.to_path_buf(),
        source,
    })
}
