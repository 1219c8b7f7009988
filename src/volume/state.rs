//! Module `volume`
//!
//! Defines the `Volume` entity tracked by the registry.

use std::path::{Path, PathBuf};

/// A named volume and the directory backing it.
///
/// The backing path is always `root` joined with `name` and never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    name: String,
    root: PathBuf,
    path: PathBuf,
}

impl Volume {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let root = root.into();
        let path = root.join(&name);
        Self { name, root, path }
    }

    /// Returns the caller-supplied volume name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base directory the volume was created under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the resolved backing directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
