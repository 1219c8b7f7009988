use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioIo, TokioTimer};
use log::{debug, error, info, warn};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::UnixStream;

use crate::protocol::responses::build_response;
use crate::protocol::{
    CommandResult, handle_command, internal_failure, parse_command, protocol_failure, read_body,
};
use crate::volume::VolumeRegistry;

/// Serves plugin API requests on one host connection until it closes.
///
/// HTTP/1.1 framing and keep-alive are handled by hyper. Each command runs on
/// the blocking pool so a slow mount check does not stall other connections.
pub async fn handle_connection(stream: UnixStream, registry: Arc<VolumeRegistry>) {
    let service = service_fn(move |request| {
        let registry = Arc::clone(&registry);
        async move { Ok::<_, Infallible>(serve_request(&registry, request).await) }
    });

    if let Err(e) = http1::Builder::new()
        .timer(TokioTimer::new())
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        debug!("Connection ended with error: {}", e);
    }
}

async fn serve_request(
    registry: &Arc<VolumeRegistry>,
    request: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let (parts, body) = request.into_parts();
    let endpoint = parts.uri.path().to_string();

    let body = match read_body(body).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejecting request to {}: {}", endpoint, e);
            return build_response(protocol_failure(&e));
        }
    };

    let result = dispatch(registry, parts.method.as_str(), &endpoint, &body).await;
    if result.status >= 400 {
        debug!("Responding {} to {}: {}", result.status, endpoint, result.body);
    }
    build_response(result)
}

async fn dispatch(
    registry: &Arc<VolumeRegistry>,
    method: &str,
    endpoint: &str,
    body: &[u8],
) -> CommandResult {
    let command = match parse_command(method, endpoint, body) {
        Ok(command) => command,
        Err(e) => {
            warn!("Bad request to {}: {}", endpoint, e);
            return protocol_failure(&e);
        }
    };
    info!("Received {:?}", command);

    let registry = Arc::clone(registry);
    match tokio::task::spawn_blocking(move || handle_command(&registry, command)).await {
        Ok(result) => result,
        Err(e) => {
            error!("Command handler for {} failed: {}", endpoint, e);
            internal_failure("internal plugin error")
        }
    }
}
