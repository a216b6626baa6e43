use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Credentials, GitError, Result};

const NETRC_FILE_NAME: &str = ".netrc";

/// Writes `<home>/.netrc` so that git subprocesses and other tools
/// authenticate against `machine` with the given credentials.
///
/// An existing file is replaced.
///
/// # Errors
///
/// Returns [`GitError::CredentialsWrite`] if the file cannot be written.
pub fn write_netrc(home: &Path, machine: &str, credentials: Credentials<'_>) -> Result<PathBuf> {
    let path = home.join(NETRC_FILE_NAME);
    let content = format!(
        "machine {machine}\nlogin {}\npassword {}",
        credentials.username, credentials.password
    );

    std::fs::write(&path, content).map_err(|source| GitError::CredentialsWrite {
        path: path.clone(),
        source,
    })?;
    restrict_permissions(&path)?;

    debug!(path = %path.display(), machine, "wrote netrc credentials");
    Ok(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(|source| {
        GitError::CredentialsWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
