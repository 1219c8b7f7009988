//! Error handlers
//!
//! Maps plugin errors to HTTP status codes for API responses.

use crate::error::types::{ProtocolError, VolumeError};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Convert a volume error to the status code the plugin API expects.
///
/// The host treats every non-2xx answer to a driver call as a failure and
/// shows the `Err` body to the user, so all registry errors share one code.
pub fn error_to_status(_err: &VolumeError) -> u16 {
    STATUS_INTERNAL_ERROR
}

/// Convert a request decoding error to a status code
pub fn protocol_error_to_status(err: &ProtocolError) -> u16 {
    match err {
        ProtocolError::UnknownEndpoint(_) => STATUS_NOT_FOUND,
        ProtocolError::MethodNotAllowed(_) => STATUS_METHOD_NOT_ALLOWED,
        ProtocolError::Malformed(_) | ProtocolError::BodyTooLarge(_) | ProtocolError::Json(_) => {
            STATUS_BAD_REQUEST
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_endpoint_maps_to_not_found() {
        let err = ProtocolError::UnknownEndpoint("/Foo".into());
        assert_eq!(protocol_error_to_status(&err), STATUS_NOT_FOUND);
    }

    #[test]
    fn volume_errors_map_to_internal_error() {
        let err = VolumeError::UnknownVolume("data".into());
        assert_eq!(error_to_status(&err), STATUS_INTERNAL_ERROR);
        assert_eq!(err.to_string(), "volume data unknown");
    }

    #[test]
    fn invalid_mount_message_names_path() {
        let err = VolumeError::InvalidMount("/mnt/mfs/data".into());
        assert_eq!(err.to_string(), "/mnt/mfs/data is not a valid MooseFS mount");
    }
}
