//! Backing storage
//!
//! Directory handling and MooseFS mount detection.

pub mod filesystem;
pub mod probe;

pub use filesystem::ensure_directory;
pub use probe::{DEFAULT_MARKER, MooseFsProbe, PathValidator};
