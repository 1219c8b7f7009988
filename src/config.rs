//! Configuration management for the MooseFS volume plugin
//!
//! Values come from built-in defaults, an optional `config.toml`, then
//! `MOOSEFS_PLUGIN_*` environment variables. Command-line flags are applied
//! on top by the binary.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::DEFAULT_MARKER;

pub const ENV_PREFIX: &str = "MOOSEFS_PLUGIN";
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Complete plugin configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PluginConfig {
    /// Host's base directory where volumes are created
    pub mountpoint: String,

    /// Enable debug logging and registry dumps
    pub verbose: bool,

    /// Name the host discovers the plugin by; also the socket file name
    pub plugin_name: String,

    /// Directory holding plugin sockets
    pub socket_dir: String,

    /// Group that owns the socket
    pub socket_group: String,

    /// File probed to recognise a MooseFS mount
    pub marker: String,
}

impl PluginConfig {
    /// Load configuration from `path` (extension optional) with environment
    /// overrides. A missing file is not an error.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("mountpoint", "/mnt/")?
            .set_default("verbose", false)?
            .set_default("plugin_name", "moosefs")?
            .set_default("socket_dir", "/run/docker/plugins")?
            .set_default("socket_group", "root")?
            .set_default("marker", DEFAULT_MARKER)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        settings.try_deserialize()
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.mountpoint.is_empty() {
            return Err(config::ConfigError::Message(
                "mountpoint cannot be empty".into(),
            ));
        }

        if !Path::new(&self.mountpoint).is_absolute() {
            return Err(config::ConfigError::Message(format!(
                "mountpoint must be an absolute path, got {:?}",
                self.mountpoint
            )));
        }

        if self.plugin_name.is_empty() || self.plugin_name.contains('/') {
            return Err(config::ConfigError::Message(format!(
                "invalid plugin name {:?}",
                self.plugin_name
            )));
        }

        if self.marker.is_empty() {
            return Err(config::ConfigError::Message("marker cannot be empty".into()));
        }

        Ok(())
    }

    /// Default root for volumes created without a `mountpoint` option
    pub fn default_root(&self) -> PathBuf {
        PathBuf::from(&self.mountpoint)
    }

    /// Full path of the plugin socket
    pub fn socket_path(&self) -> PathBuf {
        PathBuf::from(&self.socket_dir).join(format!("{}.sock", self.plugin_name))
    }
}
