use log::{error, info};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::UnixListener;

use crate::config::PluginConfig;
use crate::error::ServerError;
use crate::server::connection::handle_connection;
use crate::server::socket::{bind_socket, remove_socket, set_socket_ownership};
use crate::volume::VolumeRegistry;

pub struct Server {
    registry: Arc<VolumeRegistry>,
    listener: UnixListener,
    socket_path: PathBuf,
}

impl Server {
    /// Binds the plugin socket described by `config` and hands it to the
    /// configured group.
    pub fn bind(config: &PluginConfig, registry: Arc<VolumeRegistry>) -> Result<Self, ServerError> {
        let socket_path = config.socket_path();
        let listener = bind_socket(&socket_path)?;

        if let Err(e) = set_socket_ownership(&socket_path, &config.socket_group) {
            remove_socket(&socket_path);
            return Err(e);
        }

        Ok(Self::from_listener(listener, socket_path, registry))
    }

    /// Wraps an already bound listener.
    pub fn from_listener(
        listener: UnixListener,
        socket_path: impl Into<PathBuf>,
        registry: Arc<VolumeRegistry>,
    ) -> Self {
        Self {
            registry,
            listener,
            socket_path: socket_path.into(),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn start(self) {
        self.serve_until(shutdown_signal()).await;
    }

    /// Accepts host connections until `shutdown` completes, then removes
    /// the socket file.
    pub async fn serve_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Serving MooseFS volumes on {} (default root {})",
            self.socket_path.display(),
            self.registry.default_root().display()
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down plugin server");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _addr)) => {
                        let registry = Arc::clone(&self.registry);

                        // Spawn a task per connection so the accept loop doesn't block
                        tokio::spawn(handle_connection(stream, registry));
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                    }
                },
            }
        }

        remove_socket(&self.socket_path);
    }
}

async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let ctrl_c = tokio::signal::ctrl_c();
    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            let _ = ctrl_c.await;
        }
    }
}
