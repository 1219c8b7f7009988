//! Module `commands`
//!
//! Defines the plugin API calls the host can make and how they are decoded
//! from an HTTP request.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ProtocolError;

/// A decoded plugin API call.
#[derive(Debug, PartialEq)]
pub enum Command {
    Activate,
    Create {
        name: String,
        options: HashMap<String, String>,
    },
    Remove {
        name: String,
    },
    Path {
        name: String,
    },
    Mount {
        name: String,
        id: String,
    },
    Unmount {
        name: String,
        id: String,
    },
    Get {
        name: String,
    },
    List,
    Capabilities,
}

/// Outcome of a command: HTTP status and JSON body
#[derive(Debug)]
pub struct CommandResult {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NameRequest {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateRequest {
    name: String,
    #[serde(default)]
    opts: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MountRequest {
    name: String,
    #[serde(default, rename = "ID")]
    id: String,
}

/// Decodes a request into a `Command`.
///
/// Every endpoint is a `POST`; calls that take no arguments ignore the body.
pub fn parse_command(method: &str, endpoint: &str, body: &[u8]) -> Result<Command, ProtocolError> {
    if !method.eq_ignore_ascii_case("POST") {
        return Err(ProtocolError::MethodNotAllowed(method.to_string()));
    }

    let command = match endpoint {
        "/Plugin.Activate" => Command::Activate,
        "/VolumeDriver.Create" => {
            let req: CreateRequest = serde_json::from_slice(body)?;
            Command::Create {
                name: req.name,
                options: req.opts.unwrap_or_default(),
            }
        }
        "/VolumeDriver.Remove" => Command::Remove {
            name: parse_name(body)?,
        },
        "/VolumeDriver.Path" => Command::Path {
            name: parse_name(body)?,
        },
        "/VolumeDriver.Mount" => {
            let req: MountRequest = serde_json::from_slice(body)?;
            Command::Mount {
                name: req.name,
                id: req.id,
            }
        }
        "/VolumeDriver.Unmount" => {
            let req: MountRequest = serde_json::from_slice(body)?;
            Command::Unmount {
                name: req.name,
                id: req.id,
            }
        }
        "/VolumeDriver.Get" => Command::Get {
            name: parse_name(body)?,
        },
        "/VolumeDriver.List" => Command::List,
        "/VolumeDriver.Capabilities" => Command::Capabilities,
        other => return Err(ProtocolError::UnknownEndpoint(other.to_string())),
    };

    Ok(command)
}

fn parse_name(body: &[u8]) -> Result<String, ProtocolError> {
    let req: NameRequest = serde_json::from_slice(body)?;
    Ok(req.name)
}
