use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use changeset_core::{DependencyManifest, PackageRef};
use changeset_git::{CommitInfo, GitError, Identity};
use changeset_project::{ChangesetsConfig, JsProject, ProjectError, WorkspaceTool};
use secrecy::SecretString;

use crate::traits::{
    ChangesetWriter, GitProvider, ManifestFetcher, ManifestLocation, ProjectProvider,
};
use crate::{OperationError, Result};

#[must_use]
pub fn manifest(
    dependencies: &[(&str, &str)],
    peer_dependencies: &[(&str, &str)],
) -> DependencyManifest {
    let to_map = |entries: &[(&str, &str)]| -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    };
    DependencyManifest {
        dependencies: to_map(dependencies),
        peer_dependencies: to_map(peer_dependencies),
    }
}

#[derive(Debug, Clone)]
pub enum MockFetch {
    Found(DependencyManifest),
    Missing,
    Failed,
}

/// Answers by repository path; unknown paths behave like a 404.
pub struct MockManifestFetcher {
    responses: HashMap<String, MockFetch>,
    requests: Mutex<Vec<(String, String, String)>>,
}

impl MockManifestFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_response(mut self, path: &str, response: MockFetch) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// `(repository, git_ref, path)` of every fetch, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String, String)> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockManifestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFetcher for MockManifestFetcher {
    fn fetch_manifest(
        &self,
        location: ManifestLocation<'_>,
    ) -> Result<Option<DependencyManifest>> {
        self.requests.lock().expect("lock poisoned").push((
            location.repository.to_string(),
            location.git_ref.to_string(),
            location.path.to_string(),
        ));

        match self
            .responses
            .get(location.path)
            .cloned()
            .unwrap_or(MockFetch::Missing)
        {
            MockFetch::Found(manifest) => Ok(Some(manifest)),
            MockFetch::Missing => Ok(None),
            MockFetch::Failed => Err(OperationError::ManifestFetchStatus {
                url: location.path.to_string(),
                status: 500,
            }),
        }
    }
}

impl ManifestFetcher for Arc<MockManifestFetcher> {
    fn fetch_manifest(
        &self,
        location: ManifestLocation<'_>,
    ) -> Result<Option<DependencyManifest>> {
        self.as_ref().fetch_manifest(location)
    }
}

pub struct MockProjectProvider {
    project: JsProject,
    manifests: HashMap<String, DependencyManifest>,
    ignore: Vec<String>,
    broken_config: bool,
}

impl MockProjectProvider {
    #[must_use]
    pub fn new(project: JsProject) -> Self {
        Self {
            project,
            manifests: HashMap::new(),
            ignore: Vec::new(),
            broken_config: false,
        }
    }

    /// Packages laid out as `<root>/packages/<name>`, in the given order.
    #[must_use]
    pub fn workspace(root: &str, names: &[&str]) -> Self {
        let root = PathBuf::from(root);
        let packages = names
            .iter()
            .map(|name| Self::package_ref(&root, name, false))
            .collect();

        Self::new(JsProject {
            root,
            tool: WorkspaceTool::PackageJson,
            packages,
        })
    }

    fn package_ref(root: &Path, name: &str, is_private: bool) -> PackageRef {
        let relative = PathBuf::from("packages").join(name);
        PackageRef {
            name: name.to_string(),
            directory: root.join(&relative),
            manifest_relative_path: relative.join("package.json"),
            is_private,
        }
    }

    #[must_use]
    pub fn with_private(mut self, name: &str) -> Self {
        let package = Self::package_ref(&self.project.root, name, true);
        self.project.packages.push(package);
        self
    }

    #[must_use]
    pub fn with_manifest(mut self, name: &str, manifest: DependencyManifest) -> Self {
        self.manifests.insert(name.to_string(), manifest);
        self
    }

    #[must_use]
    pub fn with_ignore(mut self, patterns: &[&str]) -> Self {
        self.ignore = patterns.iter().map(|p| (*p).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_broken_config(mut self) -> Self {
        self.broken_config = true;
        self
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_project(&self, _start_path: &Path) -> Result<JsProject> {
        Ok(self.project.clone())
    }

    fn load_config(&self, _project: &JsProject) -> Result<ChangesetsConfig> {
        if self.broken_config {
            return Err(ProjectError::Io(std::io::Error::other("config unreadable")).into());
        }
        Ok(ChangesetsConfig::with_ignore(&self.ignore)?)
    }

    fn read_manifest(&self, package: &PackageRef) -> Result<DependencyManifest> {
        self.manifests
            .get(&package.name)
            .cloned()
            .ok_or_else(|| OperationError::ManifestRead {
                path: package.manifest_path(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

impl ProjectProvider for Arc<MockProjectProvider> {
    fn discover_project(&self, start_path: &Path) -> Result<JsProject> {
        self.as_ref().discover_project(start_path)
    }

    fn load_config(&self, project: &JsProject) -> Result<ChangesetsConfig> {
        self.as_ref().load_config(project)
    }

    fn read_manifest(&self, package: &PackageRef) -> Result<DependencyManifest> {
        self.as_ref().read_manifest(package)
    }
}

pub struct MockGitProvider {
    clean: bool,
    fail_sync: bool,
    project_prefix: Option<PathBuf>,
    credential_homes: Mutex<Vec<PathBuf>>,
    identities: Mutex<Vec<String>>,
    synced_branches: Mutex<Vec<String>>,
    staged: Mutex<bool>,
    commits: Mutex<Vec<String>>,
    pushed_branches: Mutex<Vec<String>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clean: true,
            fail_sync: false,
            project_prefix: Some(PathBuf::new()),
            credential_homes: Mutex::new(Vec::new()),
            identities: Mutex::new(Vec::new()),
            synced_branches: Mutex::new(Vec::new()),
            staged: Mutex::new(false),
            commits: Mutex::new(Vec::new()),
            pushed_branches: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn is_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub fn failing_sync(mut self) -> Self {
        self.fail_sync = true;
        self
    }

    #[must_use]
    pub fn with_project_prefix(mut self, prefix: &str) -> Self {
        self.project_prefix = Some(PathBuf::from(prefix));
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn credential_homes(&self) -> Vec<PathBuf> {
        self.credential_homes.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn identities(&self) -> Vec<String> {
        self.identities.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn synced_branches(&self) -> Vec<String> {
        self.synced_branches.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged(&self) -> bool {
        *self.staged.lock().expect("lock poisoned")
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn pushed_branches(&self) -> Vec<String> {
        self.pushed_branches.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn install_credentials(&self, home: &Path, _token: &SecretString) -> Result<PathBuf> {
        self.credential_homes
            .lock()
            .expect("lock poisoned")
            .push(home.to_path_buf());
        Ok(home.join(".netrc"))
    }

    fn configure_identity(&self, _repo_path: &Path, identity: Identity<'_>) -> Result<()> {
        self.identities
            .lock()
            .expect("lock poisoned")
            .push(identity.name.to_string());
        Ok(())
    }

    fn relative_to_root(&self, _repo_path: &Path, _path: &Path) -> Result<Option<PathBuf>> {
        Ok(self.project_prefix.clone())
    }

    fn sync_branch(&self, _repo_path: &Path, branch: &str, _token: &SecretString) -> Result<()> {
        if self.fail_sync {
            return Err(GitError::RefNotFound {
                refspec: format!("origin/{branch}"),
            }
            .into());
        }
        self.synced_branches
            .lock()
            .expect("lock poisoned")
            .push(branch.to_string());
        Ok(())
    }

    fn is_working_tree_clean(&self, _repo_path: &Path) -> Result<bool> {
        Ok(self.clean)
    }

    fn stage_all(&self, _repo_path: &Path) -> Result<()> {
        *self.staged.lock().expect("lock poisoned") = true;
        Ok(())
    }

    fn commit(&self, _repo_path: &Path, message: &str) -> Result<CommitInfo> {
        self.commits
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        Ok(CommitInfo {
            sha: "abc123def456".to_string(),
            message: message.to_string(),
        })
    }

    fn push_branch(&self, _repo_path: &Path, branch: &str, _token: &SecretString) -> Result<()> {
        self.pushed_branches
            .lock()
            .expect("lock poisoned")
            .push(branch.to_string());
        Ok(())
    }
}

impl GitProvider for Arc<MockGitProvider> {
    fn install_credentials(&self, home: &Path, token: &SecretString) -> Result<PathBuf> {
        self.as_ref().install_credentials(home, token)
    }

    fn configure_identity(&self, repo_path: &Path, identity: Identity<'_>) -> Result<()> {
        self.as_ref().configure_identity(repo_path, identity)
    }

    fn relative_to_root(&self, repo_path: &Path, path: &Path) -> Result<Option<PathBuf>> {
        self.as_ref().relative_to_root(repo_path, path)
    }

    fn sync_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()> {
        self.as_ref().sync_branch(repo_path, branch, token)
    }

    fn is_working_tree_clean(&self, repo_path: &Path) -> Result<bool> {
        self.as_ref().is_working_tree_clean(repo_path)
    }

    fn stage_all(&self, repo_path: &Path) -> Result<()> {
        self.as_ref().stage_all(repo_path)
    }

    fn commit(&self, repo_path: &Path, message: &str) -> Result<CommitInfo> {
        self.as_ref().commit(repo_path, message)
    }

    fn push_branch(&self, repo_path: &Path, branch: &str, token: &SecretString) -> Result<()> {
        self.as_ref().push_branch(repo_path, branch, token)
    }
}

/// In-memory changeset files keyed by path.
pub struct MockChangesetWriter {
    files: Mutex<HashMap<PathBuf, String>>,
    ensured_dirs: Mutex<Vec<PathBuf>>,
    write_count: Mutex<usize>,
}

impl MockChangesetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            ensured_dirs: Mutex::new(Vec::new()),
            write_count: Mutex::new(0),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_file(self, path: PathBuf, content: &str) -> Self {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path, content.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("lock poisoned").get(path).cloned()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn ensured_dirs(&self) -> Vec<PathBuf> {
        self.ensured_dirs.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.write_count.lock().expect("lock poisoned")
    }
}

impl Default for MockChangesetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetWriter for MockChangesetWriter {
    fn read_changeset(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.content(path))
    }

    fn ensure_dir(&self, changeset_dir: &Path) -> Result<()> {
        let mut dirs = self.ensured_dirs.lock().expect("lock poisoned");
        if !dirs.iter().any(|d| d == changeset_dir) {
            dirs.push(changeset_dir.to_path_buf());
        }
        Ok(())
    }

    fn write_changeset(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), content.to_string());
        *self.write_count.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    fn remove_changeset(&self, path: &Path) -> Result<bool> {
        Ok(self
            .files
            .lock()
            .expect("lock poisoned")
            .remove(path)
            .is_some())
    }
}

impl ChangesetWriter for Arc<MockChangesetWriter> {
    fn read_changeset(&self, path: &Path) -> Result<Option<String>> {
        self.as_ref().read_changeset(path)
    }

    fn ensure_dir(&self, changeset_dir: &Path) -> Result<()> {
        self.as_ref().ensure_dir(changeset_dir)
    }

    fn write_changeset(&self, path: &Path, content: &str) -> Result<()> {
        self.as_ref().write_changeset(path, content)
    }

    fn remove_changeset(&self, path: &Path) -> Result<bool> {
        self.as_ref().remove_changeset(path)
    }
}
