//! Error handling
//!
//! Defines error types and handling for the volume plugin.

pub mod handlers;
pub mod types;

pub use types::*;
