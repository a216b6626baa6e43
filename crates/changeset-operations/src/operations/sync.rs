use std::path::{Component, Path, PathBuf};

use changeset_core::{PackageChangeSet, PackageRef, diff_manifests};
use changeset_git::Identity;
use changeset_project::{ChangesetsConfig, DEFAULT_CHANGESET_DIR, JsProject, relevant_packages};
use tracing::{debug, info, warn};

use super::reconcile::ChangesetReconciler;
use super::render::render_changeset;
use crate::traits::{
    ChangesetWriter, GitProvider, ManifestFetcher, ManifestLocation, ProjectProvider,
};
use crate::{PackageSkip, PublishOutcome, Result, RunConfig, SkipReason, SyncOutcome};

pub const COMMIT_MESSAGE: &str = "chore(changeset): update dependency changesets";

pub const BOT_IDENTITY: Identity<'static> = Identity {
    name: "github-actions[bot]",
    email: "github-actions[bot]@users.noreply.github.com",
};

/// An error message followed by its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Repository path of a manifest as the raw content host expects it.
fn remote_manifest_path(prefix: &Path, manifest_relative_path: &Path) -> String {
    prefix
        .join(manifest_relative_path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Brings the dependency changesets of a pull request up to date and
/// publishes them to its branch.
pub struct SyncOperation<F, P, G, W> {
    fetcher: F,
    project_provider: P,
    git_provider: G,
    reconciler: ChangesetReconciler<W>,
}

impl<F, P, G, W> SyncOperation<F, P, G, W>
where
    F: ManifestFetcher,
    P: ProjectProvider,
    G: GitProvider,
    W: ChangesetWriter,
{
    pub fn new(fetcher: F, project_provider: P, git_provider: G, changeset_writer: W) -> Self {
        Self {
            fetcher,
            project_provider,
            git_provider,
            reconciler: ChangesetReconciler::new(changeset_writer),
        }
    }

    /// Runs the whole pipeline for one pull request.
    ///
    /// Packages whose manifests cannot be compared are skipped and reported
    /// in the outcome. Everything else that fails aborts the run.
    ///
    /// # Errors
    ///
    /// Returns an error if git setup, project discovery, branch checkout,
    /// file reconciliation, commit or push fails.
    pub fn execute(&self, config: &RunConfig) -> Result<SyncOutcome> {
        self.setup_git(config)?;

        let (project, packages) = self.discover_packages(config)?;
        let prefix = self.manifest_prefix(config, &project)?;

        let mut diffs = Vec::with_capacity(packages.len());
        let mut skipped = Vec::new();
        for package in &packages {
            match self.diff_package(config, &prefix, package) {
                Ok(changes) => {
                    debug!(package = %package.name, changes = changes.len(), "diffed package");
                    diffs.push(changes);
                }
                Err(reason) => {
                    warn!(package = %package.name, %reason, "skipping package");
                    skipped.push(PackageSkip {
                        package_name: package.name.clone(),
                        reason,
                    });
                }
            }
        }

        info!(branch = %config.head_branch, "checking out pull request branch");
        self.git_provider
            .sync_branch(&config.working_dir, &config.head_branch, &config.token)?;

        let changeset_dir = project.root.join(DEFAULT_CHANGESET_DIR);
        let mut artifacts = Vec::with_capacity(diffs.len());
        for changes in &diffs {
            let artifact = render_changeset(changes)?;
            let report = self.reconciler.reconcile(
                &changeset_dir,
                &changes.package_name,
                config.pr_number,
                artifact.as_ref(),
            )?;
            info!(package = %report.package_name, action = %report.action, "reconciled changeset");
            artifacts.push(report);
        }

        let publish = self.publish(config)?;

        Ok(SyncOutcome {
            artifacts,
            skipped,
            publish,
        })
    }

    fn setup_git(&self, config: &RunConfig) -> Result<()> {
        match &config.home {
            Some(home) => {
                let path = self.git_provider.install_credentials(home, &config.token)?;
                debug!(path = %path.display(), "installed git credentials");
            }
            None => warn!("no home directory known, not writing a credential file"),
        }

        self.git_provider
            .configure_identity(&config.working_dir, BOT_IDENTITY)
    }

    fn discover_packages(&self, config: &RunConfig) -> Result<(JsProject, Vec<PackageRef>)> {
        let project = self.project_provider.discover_project(&config.working_dir)?;

        let changesets_config = self
            .project_provider
            .load_config(&project)
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to load changesets config, using defaults");
                ChangesetsConfig::default()
            });

        let packages = relevant_packages(&project, &changesets_config);
        info!(
            root = %project.root.display(),
            total = project.packages.len(),
            relevant = packages.len(),
            "discovered packages"
        );

        Ok((project, packages))
    }

    /// The project root's location inside the repository, so that manifest
    /// paths can be resolved on the remote host.
    fn manifest_prefix(&self, config: &RunConfig, project: &JsProject) -> Result<PathBuf> {
        let prefix = self
            .git_provider
            .relative_to_root(&config.working_dir, &project.root)?;

        Ok(prefix.unwrap_or_else(|| {
            warn!(
                root = %project.root.display(),
                "project root is outside the repository, treating it as the repository root"
            );
            PathBuf::new()
        }))
    }

    fn diff_package(
        &self,
        config: &RunConfig,
        prefix: &Path,
        package: &PackageRef,
    ) -> std::result::Result<PackageChangeSet, SkipReason> {
        let path = remote_manifest_path(prefix, &package.manifest_relative_path);
        let location = ManifestLocation {
            repository: &config.repository,
            git_ref: &config.base_sha,
            path: &path,
        };

        let old = match self.fetcher.fetch_manifest(location) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => return Err(SkipReason::NoPriorManifest),
            Err(e) => return Err(SkipReason::FetchFailed(error_chain(&e))),
        };

        let new = self
            .project_provider
            .read_manifest(package)
            .map_err(|e| SkipReason::CurrentManifestUnreadable(error_chain(&e)))?;

        Ok(diff_manifests(&package.name, &old, &new))
    }

    fn publish(&self, config: &RunConfig) -> Result<PublishOutcome> {
        let repo_path = &config.working_dir;
        let clean = self.git_provider.is_working_tree_clean(repo_path)?;

        if config.dry_run {
            info!(dirty = !clean, "dry run, not committing");
            return Ok(PublishOutcome::DryRun { dirty: !clean });
        }

        if clean {
            info!("working tree clean, nothing to commit");
            return Ok(PublishOutcome::Clean);
        }

        self.git_provider.stage_all(repo_path)?;
        let commit = self.git_provider.commit(repo_path, COMMIT_MESSAGE)?;
        self.git_provider
            .push_branch(repo_path, &config.head_branch, &config.token)?;

        info!(commit = %commit.sha, branch = %config.head_branch, "pushed changesets");
        Ok(PublishOutcome::Pushed {
            commit_sha: commit.sha,
        })
    }
}
