//! Volume plugin protocol implementation
//!
//! Handles body reading, command decoding and response generation.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{Command, CommandResult, parse_command};
pub use handlers::{handle_command, internal_failure, protocol_failure};
pub use parser::{MAX_BODY_SIZE, read_body};
