pub mod cli;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod utils;
pub mod volume;

pub use server::Server;
pub use storage::{MooseFsProbe, PathValidator};
pub use volume::VolumeRegistry;
