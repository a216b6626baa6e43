use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use changeset_core::PackageRef;
use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::config::ChangesetsConfig;
use crate::error::ProjectError;
use crate::manifest::{PACKAGE_JSON, PNPM_WORKSPACE, read_package_json, read_pnpm_workspace};

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceTool {
    /// `workspaces` in the root `package.json` (npm, yarn, bun).
    PackageJson,
    Pnpm,
    /// A lone `package.json` without workspaces.
    SinglePackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsProject {
    pub root: PathBuf,
    pub tool: WorkspaceTool,
    pub packages: Vec<PackageRef>,
}

/// # Errors
///
/// Returns `ProjectError` if no project root can be found or if a manifest
/// cannot be parsed.
pub fn discover_project(start_dir: &Path) -> Result<JsProject, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| ProjectError::ManifestRead {
            path: start_dir.to_path_buf(),
            source,
        })?;

    let (root, tool, patterns) = find_project_root(&start_dir)?;
    let packages = match tool {
        WorkspaceTool::SinglePackage => vec![read_package_ref(&root, &root)?],
        WorkspaceTool::PackageJson | WorkspaceTool::Pnpm => collect_packages(&root, &patterns)?,
    };

    debug!(root = %root.display(), ?tool, count = packages.len(), "discovered project");

    Ok(JsProject {
        root,
        tool,
        packages,
    })
}

/// Packages eligible for dependency changesets: not private and not ignored
/// by the changesets configuration. Enumeration order is preserved.
#[must_use]
pub fn relevant_packages(project: &JsProject, config: &ChangesetsConfig) -> Vec<PackageRef> {
    project
        .packages
        .iter()
        .filter(|pkg| {
            if pkg.is_private {
                debug!(package = %pkg.name, "skipping private package");
                return false;
            }
            if config.is_ignored(&pkg.name) {
                debug!(package = %pkg.name, "skipping ignored package");
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// Creates the changeset directory and its parents, tolerating an existing one.
///
/// # Errors
///
/// Returns [`ProjectError::ChangesetDirCreate`] if directory creation fails.
pub fn ensure_changeset_dir(path: &Path) -> Result<(), ProjectError> {
    std::fs::create_dir_all(path).map_err(|source| ProjectError::ChangesetDirCreate {
        path: path.to_path_buf(),
        source,
    })
}

fn find_project_root(
    start_dir: &Path,
) -> Result<(PathBuf, WorkspaceTool, Vec<String>), ProjectError> {
    let mut current = start_dir.to_path_buf();
    let mut fallback_single_package: Option<PathBuf> = None;

    loop {
        let pnpm_path = current.join(PNPM_WORKSPACE);
        if pnpm_path.is_file() {
            let workspace = read_pnpm_workspace(&pnpm_path)?;
            return Ok((current, WorkspaceTool::Pnpm, workspace.packages));
        }

        let manifest_path = current.join(PACKAGE_JSON);
        if manifest_path.is_file() {
            let manifest = read_package_json(&manifest_path)?;

            if let Some(workspaces) = manifest.workspaces {
                let patterns = workspaces.patterns().to_vec();
                return Ok((current, WorkspaceTool::PackageJson, patterns));
            }

            if fallback_single_package.is_none() {
                fallback_single_package = Some(current.clone());
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return fallback_single_package
                    .map(|root| (root, WorkspaceTool::SinglePackage, Vec::new()))
                    .ok_or_else(|| ProjectError::NotFound {
                        start_dir: start_dir.to_path_buf(),
                    });
            }
        }
    }
}

fn collect_packages(root: &Path, patterns: &[String]) -> Result<Vec<PackageRef>, ProjectError> {
    let (excludes, includes): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));

    let includes = includes
        .into_iter()
        .map(|p| compile_pattern(p))
        .collect::<Result<Vec<_>, _>>()?;
    let excludes = excludes
        .into_iter()
        .map(|p| compile_pattern(&p[1..]))
        .collect::<Result<Vec<_>, _>>()?;

    let mut dirs = BTreeSet::new();
    collect_matching_dirs(root, root, &includes, &excludes, &mut dirs)?;

    let mut packages = Vec::new();
    for dir in dirs {
        if !dir.join(PACKAGE_JSON).is_file() {
            continue;
        }
        packages.push(read_package_ref(root, &dir)?);
    }

    Ok(packages)
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, ProjectError> {
    let normalized = pattern.trim_start_matches("./").trim_end_matches('/');
    GlobBuilder::new(normalized)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    includes: &[GlobMatcher],
    excludes: &[GlobMatcher],
    results: &mut BTreeSet<PathBuf>,
) -> Result<(), ProjectError> {
    let mut entries = std::fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if !path.is_dir() {
            continue;
        }

        let skipped = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| SKIPPED_DIRS.contains(&n));
        if skipped {
            continue;
        }

        let relative = path.strip_prefix(base).unwrap_or(&path);

        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }

        if includes.iter().any(|inc| inc.is_match(relative)) {
            results.insert(path.clone());
        }

        collect_matching_dirs(base, &path, includes, excludes, results)?;
    }

    Ok(())
}

fn read_package_ref(root: &Path, dir: &Path) -> Result<PackageRef, ProjectError> {
    let manifest_path = dir.join(PACKAGE_JSON);
    let manifest = read_package_json(&manifest_path)?;

    let name = manifest.name.ok_or_else(|| ProjectError::MissingField {
        path: manifest_path.clone(),
        field: "name",
    })?;

    let manifest_relative_path = manifest_path
        .strip_prefix(root)
        .map_or_else(|_| manifest_path.clone(), Path::to_path_buf);

    Ok(PackageRef {
        name,
        directory: dir.to_path_buf(),
        manifest_relative_path,
        is_private: manifest.private,
    })
}
