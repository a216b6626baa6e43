use std::path::Path;

use changeset_core::{DependencyManifest, PackageRef};
use changeset_project::{ChangesetsConfig, JsProject};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no project can be found from the given path.
    fn discover_project(&self, start_path: &Path) -> Result<JsProject>;

    /// # Errors
    ///
    /// Returns an error if the configuration file exists but is unusable.
    fn load_config(&self, project: &JsProject) -> Result<ChangesetsConfig>;

    /// Reads the package's manifest from the working tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or parsed.
    fn read_manifest(&self, package: &PackageRef) -> Result<DependencyManifest>;
}
