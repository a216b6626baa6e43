use std::path::Path;

use changeset_core::{DependencyManifest, PackageRef};
use changeset_project::{ChangesetsConfig, JsProject, discover_project, load_changesets_config};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn discover_project(&self, start_path: &Path) -> Result<JsProject> {
        Ok(discover_project(start_path)?)
    }

    fn load_config(&self, project: &JsProject) -> Result<ChangesetsConfig> {
        Ok(load_changesets_config(&project.root)?)
    }

    fn read_manifest(&self, package: &PackageRef) -> Result<DependencyManifest> {
        let path = package.manifest_path();
        let content =
            std::fs::read_to_string(&path).map_err(|source| OperationError::ManifestRead {
                path: path.clone(),
                source,
            })?;

        DependencyManifest::from_json(&content)
            .map_err(|source| OperationError::ManifestParse { path, source })
    }
}
