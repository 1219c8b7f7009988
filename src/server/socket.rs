//! Plugin socket setup
//!
//! Binds the Unix socket the host discovers plugins through and hands it to
//! the privileged group.

use log::{debug, info, warn};
use nix::unistd::Group;
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::{PermissionsExt, chown};
use std::path::Path;
use tokio::net::UnixListener;

use crate::error::ServerError;

const SOCKET_MODE: u32 = 0o660;

/// Binds a listener at `path`, replacing a stale socket left by a previous run.
pub fn bind_socket(path: &Path) -> Result<UnixListener, ServerError> {
    let socket_err = |source| ServerError::Socket {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(socket_err)?;
    }

    match fs::remove_file(path) {
        Ok(()) => warn!("Removed stale socket {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(socket_err(e)),
    }

    let listener = UnixListener::bind(path).map_err(socket_err)?;
    info!("Plugin socket bound to {}", path.display());
    Ok(listener)
}

/// Resolves a group name to its gid.
pub fn lookup_group_gid(name: &str) -> Result<u32, ServerError> {
    match Group::from_name(name) {
        Ok(Some(group)) => Ok(group.gid.as_raw()),
        Ok(None) => Err(ServerError::GroupNotFound(name.to_string())),
        Err(source) => Err(ServerError::GroupLookup {
            name: name.to_string(),
            source,
        }),
    }
}

/// Gives the socket to root and `group`, readable and writable by both.
pub fn set_socket_ownership(path: &Path, group: &str) -> Result<(), ServerError> {
    let gid = lookup_group_gid(group)?;
    let socket_err = |source| ServerError::Socket {
        path: path.to_path_buf(),
        source,
    };

    chown(path, Some(0), Some(gid)).map_err(socket_err)?;
    fs::set_permissions(path, fs::Permissions::from_mode(SOCKET_MODE)).map_err(socket_err)?;

    debug!(
        "Socket {} owned by root:{} ({}) mode {:o}",
        path.display(),
        group,
        gid,
        SOCKET_MODE
    );
    Ok(())
}

/// Removes the socket file on shutdown.
pub fn remove_socket(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!("Removed plugin socket {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove plugin socket {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn rebinds_over_stale_socket() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plugins").join("moosefs.sock");

        let first = bind_socket(&path).unwrap();
        drop(first);
        assert!(path.exists());

        let _second = bind_socket(&path).unwrap();
        remove_socket(&path);
        assert!(!path.exists());
    }

    #[test]
    fn root_group_resolves() {
        assert_eq!(lookup_group_gid("root").unwrap(), 0);
    }

    #[test]
    fn missing_group_is_reported() {
        let err = lookup_group_gid("no-such-group-for-moosefs").unwrap_err();
        assert!(matches!(err, ServerError::GroupNotFound(_)));
    }
}
