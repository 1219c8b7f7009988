//! Request body reading
//!
//! Collects the JSON body of a plugin API request, bounded by `MAX_BODY_SIZE`.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use std::error::Error;

use crate::error::ProtocolError;

pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Reads the whole request body, refusing anything over `MAX_BODY_SIZE`.
///
/// Framing errors from the connection (bad chunk sizes, early EOF) come back
/// as `Malformed`.
pub async fn read_body<B>(body: B) -> Result<Bytes, ProtocolError>
where
    B: Body,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_SIZE).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ProtocolError::BodyTooLarge(MAX_BODY_SIZE))
        }
        Err(e) => Err(ProtocolError::Malformed(format!(
            "failed to read request body: {}",
            e
        ))),
    }
}
