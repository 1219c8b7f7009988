//! File system operations
//!
//! Handles the backing directories of volumes.

use log::{debug, error};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::VolumeError;

/// Make sure `path` exists as a directory, creating it and any missing parents.
///
/// An existing non-directory at `path` is reported as `NotADirectory`.
pub fn ensure_directory(path: &Path) -> Result<(), VolumeError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            error!("Backing path {} exists but is not a directory", path.display());
            return Err(VolumeError::NotADirectory(path.to_path_buf()));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            error!("Failed to stat backing path {}: {}", path.display(), e);
            return Err(VolumeError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    }

    fs::create_dir_all(path).map_err(|e| {
        error!("Failed to create backing directory {}: {}", path.display(), e);
        VolumeError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    debug!("Created backing directory {}", path.display());
    Ok(())
}
