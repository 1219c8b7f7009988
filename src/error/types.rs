//! Error types
//!
//! Defines the errors returned by volume lifecycle operations and by server startup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the volume registry
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The backing path is not on the expected MooseFS mount
    #[error("{} is not a valid MooseFS mount", .0.display())]
    InvalidMount(PathBuf),

    #[error("volume {0} already exists")]
    AlreadyExists(String),

    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("filesystem error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("volume {0} unknown")]
    UnknownVolume(String),

    /// Name is empty or would resolve outside of the volume root
    #[error("invalid volume name: {0:?}")]
    InvalidName(String),

    #[error("option {key} must be an absolute path, got {value:?}")]
    InvalidOption { key: String, value: String },
}

/// Errors that stop the plugin server from starting or serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to prepare socket {}: {source}", .path.display())]
    Socket {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("group {0} not found")]
    GroupNotFound(String),

    #[error("failed to look up group {name}: {source}")]
    GroupLookup {
        name: String,
        #[source]
        source: nix::Error,
    },
}

/// Errors raised while decoding a plugin API request
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Body exceeded the given limit in bytes
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
}
