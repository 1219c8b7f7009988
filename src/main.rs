//! MooseFS volume plugin - Entry Point
//!
//! Lets Docker create and mount named volumes on an existing MooseFS mount.

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;

use moosefs_volume_plugin::cli::Args;
use moosefs_volume_plugin::utils::logging::setup_logging;
use moosefs_volume_plugin::{MooseFsProbe, Server, VolumeRegistry};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_logging(config.verbose);
    info!("Launching MooseFS volume plugin...");

    let probe = Arc::new(MooseFsProbe::new(&config.marker));
    let registry = Arc::new(VolumeRegistry::new(config.default_root(), probe));

    let server = match Server::bind(&config, registry) {
        Ok(server) => server,
        Err(e) => {
            error!("Plugin startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    server.start().await;
    ExitCode::SUCCESS
}
