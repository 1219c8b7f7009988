//! Volume management
//!
//! Holds the registry of named volumes and their lifecycle operations.

pub mod registry;
pub mod results;
pub mod state;

pub use registry::{ROOT_OPTION, VolumeRegistry};
pub use results::{Capabilities, Scope};
pub use state::Volume;
