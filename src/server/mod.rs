//! Server core functionality
//!
//! This module contains the plugin socket listener, per-connection request
//! handling and socket ownership setup.

pub mod connection;
pub mod core;
pub mod socket;

pub use core::Server;
