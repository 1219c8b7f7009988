//! Command-line interface

use clap::Parser;

use crate::config::{DEFAULT_CONFIG_FILE, PluginConfig};

/// Docker volume plugin for MooseFS.
#[derive(Parser, Debug)]
#[command(name = "moosefs-volume-plugin")]
#[command(about = "Serve Docker volumes from an existing MooseFS mount")]
pub struct Args {
    /// Host's base directory where volumes are created
    #[arg(long)]
    pub mountpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Plugin name, also used for the socket file name
    #[arg(long)]
    pub name: Option<String>,

    /// Directory the plugin socket is created in
    #[arg(long)]
    pub socket_dir: Option<String>,

    /// Group that owns the plugin socket
    #[arg(long)]
    pub group: Option<String>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
}

impl Args {
    /// Loads the configuration file and applies the flags on top of it.
    pub fn load_config(&self) -> Result<PluginConfig, config::ConfigError> {
        let mut config = PluginConfig::load(&self.config)?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut PluginConfig) {
        if let Some(mountpoint) = &self.mountpoint {
            config.mountpoint = mountpoint.clone();
        }
        if self.verbose {
            config.verbose = true;
        }
        if let Some(name) = &self.name {
            config.plugin_name = name.clone();
        }
        if let Some(dir) = &self.socket_dir {
            config.socket_dir = dir.clone();
        }
        if let Some(group) = &self.group {
            config.socket_group = group.clone();
        }
    }
}
