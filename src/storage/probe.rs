//! Mount probing
//!
//! Decides whether a directory is backed by a MooseFS mount.

use log::error;
use nix::sys::statfs::statfs;
use std::path::{Path, PathBuf};

/// File every MooseFS client mount exposes at its root
pub const DEFAULT_MARKER: &str = ".masterinfo";

/// Accepts or rejects a directory as the backing store of a volume.
///
/// Implementations never fail: any problem is a rejection.
pub trait PathValidator: Send + Sync {
    fn validate(&self, path: &Path) -> bool;
}

/// Probes for the MooseFS marker file with `statfs(2)`.
#[derive(Debug, Clone)]
pub struct MooseFsProbe {
    marker: PathBuf,
}

impl MooseFsProbe {
    pub fn new(marker: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &Path {
        &self.marker
    }
}

impl Default for MooseFsProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl PathValidator for MooseFsProbe {
    fn validate(&self, path: &Path) -> bool {
        match statfs(&path.join(&self.marker)) {
            Ok(_) => true,
            Err(e) => {
                error!(
                    "Could not determine filesystem type for {}: {}",
                    path.display(),
                    e
                );
                false
            }
        }
    }
}
