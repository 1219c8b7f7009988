//! Command handlers for the volume plugin.
//!
//! Each plugin API call is mapped onto the volume registry and its outcome
//! encoded as a JSON response body.

use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::handlers::{
    STATUS_INTERNAL_ERROR, STATUS_OK, error_to_status, protocol_error_to_status,
};
use crate::error::{ProtocolError, VolumeError};
use crate::protocol::responses::{
    ActivateResponse, CapabilitiesResponse, EmptyResponse, ErrorResponse, GetResponse,
    ListResponse, MountpointResponse, VolumeEntry, to_json,
};
use crate::protocol::{Command, CommandResult};
use crate::volume::VolumeRegistry;

/// Dispatches a decoded plugin API call to its handler.
///
/// Runs registry operations synchronously; callers on an async runtime
/// should invoke it from a blocking task.
pub fn handle_command(registry: &VolumeRegistry, command: Command) -> CommandResult {
    match command {
        Command::Activate => handle_activate(),
        Command::Create { name, options } => {
            respond(registry.create(&name, &options).map(|_| EmptyResponse {}))
        }
        Command::Remove { name } => {
            registry.remove(&name);
            ok(&EmptyResponse {})
        }
        Command::Path { name } => respond(registry.path(&name).map(mountpoint)),
        Command::Mount { name, id } => {
            info!("Mount of volume {} requested by {}", name, id);
            respond(registry.mount(&name).map(mountpoint))
        }
        Command::Unmount { name, id } => {
            info!("Unmount of volume {} requested by {}", name, id);
            respond(registry.unmount(&name).map(|_| EmptyResponse {}))
        }
        Command::Get { name } => respond(registry.get(&name).map(|v| GetResponse {
            volume: VolumeEntry::from(&v),
        })),
        Command::List => ok(&ListResponse {
            volumes: registry.list().iter().map(VolumeEntry::from).collect(),
        }),
        Command::Capabilities => ok(&CapabilitiesResponse {
            capabilities: registry.capabilities(),
        }),
    }
}

fn handle_activate() -> CommandResult {
    ok(&ActivateResponse {
        implements: vec!["VolumeDriver"],
    })
}

/// Response for a request that could not be decoded
pub fn protocol_failure(err: &ProtocolError) -> CommandResult {
    CommandResult {
        status: protocol_error_to_status(err),
        body: to_json(&ErrorResponse {
            err: err.to_string(),
        }),
    }
}

/// Response for a request that failed inside the server
pub fn internal_failure(message: &str) -> CommandResult {
    CommandResult {
        status: STATUS_INTERNAL_ERROR,
        body: to_json(&ErrorResponse {
            err: message.to_string(),
        }),
    }
}

fn mountpoint(path: PathBuf) -> MountpointResponse {
    MountpointResponse {
        mountpoint: path.to_string_lossy().to_string(),
    }
}

fn ok<T: Serialize>(value: &T) -> CommandResult {
    CommandResult {
        status: STATUS_OK,
        body: to_json(value),
    }
}

fn respond<T: Serialize>(result: Result<T, VolumeError>) -> CommandResult {
    match result {
        Ok(value) => ok(&value),
        Err(e) => CommandResult {
            status: error_to_status(&e),
            body: to_json(&ErrorResponse { err: e.to_string() }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PathValidator;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct AcceptAll;

    impl PathValidator for AcceptAll {
        fn validate(&self, _path: &Path) -> bool {
            true
        }
    }

    fn registry() -> (TempDir, VolumeRegistry) {
        let tmp = TempDir::new().unwrap();
        let registry = VolumeRegistry::new(tmp.path(), Arc::new(AcceptAll));
        (tmp, registry)
    }

    #[test]
    fn activate_implements_volume_driver() {
        let (_tmp, registry) = registry();
        let result = handle_command(&registry, Command::Activate);
        assert_eq!(result.status, 200);
        assert_eq!(result.body, r#"{"Implements":["VolumeDriver"]}"#);
    }

    #[test]
    fn create_then_path() {
        let (tmp, registry) = registry();
        let created = handle_command(
            &registry,
            Command::Create {
                name: "data".into(),
                options: HashMap::new(),
            },
        );
        assert_eq!(created.status, 200);
        assert_eq!(created.body, "{}");

        let path = handle_command(&registry, Command::Path { name: "data".into() });
        let expected = format!(
            r#"{{"Mountpoint":"{}"}}"#,
            tmp.path().join("data").display()
        );
        assert_eq!(path.body, expected);
    }

    #[test]
    fn unknown_volume_reports_err() {
        let (_tmp, registry) = registry();
        let result = handle_command(&registry, Command::Get { name: "nope".into() });
        assert_eq!(result.status, 500);
        assert_eq!(result.body, r#"{"Err":"volume nope unknown"}"#);
    }

    #[test]
    fn remove_unknown_is_ok() {
        let (_tmp, registry) = registry();
        let result = handle_command(&registry, Command::Remove { name: "nope".into() });
        assert_eq!(result.status, 200);
    }

    #[test]
    fn list_empty() {
        let (_tmp, registry) = registry();
        let result = handle_command(&registry, Command::List);
        assert_eq!(result.body, r#"{"Volumes":[]}"#);
    }
}
