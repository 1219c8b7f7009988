//! Volume registry
//!
//! Tracks which volumes exist and where each one lives on the backing filesystem.

use log::{debug, error, info, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::VolumeError;
use crate::storage::{PathValidator, ensure_directory};
use crate::volume::results::{Capabilities, Scope};
use crate::volume::state::Volume;

/// Create option overriding the base directory of a single volume
pub const ROOT_OPTION: &str = "mountpoint";

/// In-memory registry of volumes, shared by every request handler.
///
/// Create and remove hold the write lock for their whole check-then-act
/// sequence; queries take the read lock.
pub struct VolumeRegistry {
    volumes: RwLock<HashMap<String, Volume>>,
    default_root: PathBuf,
    validator: Arc<dyn PathValidator>,
}

impl VolumeRegistry {
    pub fn new(default_root: impl Into<PathBuf>, validator: Arc<dyn PathValidator>) -> Self {
        Self {
            volumes: RwLock::new(HashMap::new()),
            default_root: default_root.into(),
            validator,
        }
    }

    pub fn default_root(&self) -> &Path {
        &self.default_root
    }

    /// Registers a new volume, creating its backing directory if needed.
    ///
    /// The directory is created under the `mountpoint` option when given,
    /// otherwise under the default root, and must pass mount validation.
    pub fn create(&self, name: &str, options: &HashMap<String, String>) -> Result<(), VolumeError> {
        validate_name(name)?;

        for key in options.keys().filter(|k| k.as_str() != ROOT_OPTION) {
            warn!("Ignoring unknown option {} for volume {}", key, name);
        }

        let root = match options.get(ROOT_OPTION) {
            Some(value) => option_root(value)?,
            None => self.default_root.clone(),
        };
        let volume = Volume::new(name, root);

        let mut volumes = self.volumes.write();

        if volumes.contains_key(name) {
            error!(
                "Cannot create volume {}, it already exists",
                volume.path().display()
            );
            return Err(VolumeError::AlreadyExists(name.to_string()));
        }

        ensure_directory(volume.path())?;

        if !self.validator.validate(volume.path()) {
            error!(
                "Cannot create volume {} as it's not a valid MooseFS mount",
                volume.path().display()
            );
            return Err(VolumeError::InvalidMount(volume.path().to_path_buf()));
        }

        info!("Created volume {} at {}", name, volume.path().display());
        volumes.insert(name.to_string(), volume);
        debug!("Registered volumes: {:#?}", *volumes);

        Ok(())
    }

    /// Forgets a volume. Unknown names are ignored and the backing
    /// directory is always left in place.
    pub fn remove(&self, name: &str) {
        if let Some(volume) = self.volumes.write().remove(name) {
            info!(
                "Removed volume {} (data kept at {})",
                name,
                volume.path().display()
            );
        }
    }

    /// Returns the backing directory of a registered volume.
    pub fn path(&self, name: &str) -> Result<PathBuf, VolumeError> {
        self.lookup(name).map(|v| v.path().to_path_buf())
    }

    /// Re-validates the backing directory and returns it.
    ///
    /// A failed validation leaves the registry entry untouched.
    pub fn mount(&self, name: &str) -> Result<PathBuf, VolumeError> {
        let volume = self.lookup(name)?;

        if !self.validator.validate(volume.path()) {
            error!(
                "Cannot mount volume {} as it's not a valid MooseFS mount",
                volume.path().display()
            );
            return Err(VolumeError::InvalidMount(volume.path().to_path_buf()));
        }

        debug!("Mounted volume {} at {}", name, volume.path().display());
        Ok(volume.path().to_path_buf())
    }

    /// The backing filesystem stays mounted for the life of the host, so
    /// there is nothing to undo.
    pub fn unmount(&self, name: &str) -> Result<(), VolumeError> {
        debug!("Unmount requested for volume {}", name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Volume, VolumeError> {
        self.lookup(name)
    }

    /// Returns every registered volume in no particular order.
    pub fn list(&self) -> Vec<Volume> {
        self.volumes.read().values().cloned().collect()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            scope: Scope::Global,
        }
    }

    pub fn len(&self) -> usize {
        self.volumes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.read().is_empty()
    }

    fn lookup(&self, name: &str) -> Result<Volume, VolumeError> {
        self.volumes
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| VolumeError::UnknownVolume(name.to_string()))
    }
}

/// A root given per volume must be absolute, otherwise it would resolve
/// against the plugin's working directory.
fn option_root(value: &str) -> Result<PathBuf, VolumeError> {
    let root = PathBuf::from(value);
    if !root.is_absolute() {
        error!("Rejecting {} option {:?}: not an absolute path", ROOT_OPTION, value);
        return Err(VolumeError::InvalidOption {
            key: ROOT_OPTION.to_string(),
            value: value.to_string(),
        });
    }
    Ok(root)
}

/// Volume names become a single path component under the root.
fn validate_name(name: &str) -> Result<(), VolumeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(VolumeError::InvalidName(name.to_string()));
    }
    Ok(())
}
