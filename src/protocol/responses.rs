//! Plugin API responses
//!
//! Response bodies of the volume plugin protocol and their HTTP wrapping.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE as CONTENT_TYPE_HEADER, HeaderValue};
use hyper::{Response, StatusCode};
use log::error;
use serde::Serialize;

use crate::protocol::CommandResult;
use crate::volume::{Capabilities, Volume};

pub const CONTENT_TYPE: &str = "application/vnd.docker.plugins.v1.2+json";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivateResponse {
    pub implements: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Err")]
    pub err: String,
}

/// Empty object, used by calls that only report success
#[derive(Serialize)]
pub struct EmptyResponse {}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MountpointResponse {
    pub mountpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VolumeEntry {
    pub name: String,
    pub mountpoint: String,
}

impl From<&Volume> for VolumeEntry {
    fn from(volume: &Volume) -> Self {
        Self {
            name: volume.name().to_string(),
            mountpoint: volume.path().to_string_lossy().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetResponse {
    pub volume: VolumeEntry,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResponse {
    pub volumes: Vec<VolumeEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapabilitiesResponse {
    pub capabilities: Capabilities,
}

/// Serialize a response body
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        error!("Failed to encode response: {}", e);
        r#"{"Err":"failed to encode response"}"#.to_string()
    })
}

/// Wrap a command result in an HTTP response with the plugin content type
pub fn build_response(result: CommandResult) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(result.body)));
    *response.status_mut() =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
        .headers_mut()
        .insert(CONTENT_TYPE_HEADER, HeaderValue::from_static(CONTENT_TYPE));
    response
}
