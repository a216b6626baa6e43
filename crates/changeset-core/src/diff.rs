use std::collections::BTreeSet;

use crate::types::{
    DependencyField, DependencyManifest, FieldChange, PackageChangeSet, VersionMap, VersionUpdate,
};

/// Computes the changes that turn `old` into `new`.
///
/// Changes are ordered by dependency name. Keys whose specifier is identical on
/// both sides produce nothing.
#[must_use]
pub fn diff_versions(old: &VersionMap, new: &VersionMap) -> Vec<FieldChange> {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    keys.into_iter()
        .filter_map(|key| match (old.get(key), new.get(key)) {
            (None, Some(value)) => Some(FieldChange::add(key, value)),
            (Some(old_value), None) => Some(FieldChange::remove(key, old_value)),
            (Some(old_value), Some(value)) => VersionUpdate::new(key, value, old_value)
                .ok()
                .map(FieldChange::Update),
            (None, None) => None,
        })
        .collect()
}

/// Diffs `dependencies` and `peerDependencies` independently.
#[must_use]
pub fn diff_manifests(
    package_name: &str,
    old: &DependencyManifest,
    new: &DependencyManifest,
) -> PackageChangeSet {
    let field_diff = |field| diff_versions(old.field(field), new.field(field));

    PackageChangeSet {
        package_name: package_name.to_string(),
        dependencies_changes: field_diff(DependencyField::Dependencies),
        peer_dependencies_changes: field_diff(DependencyField::PeerDependencies),
    }
}
