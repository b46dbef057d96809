//! Resource client for the media backend.
//!
//! Each method is exactly one round trip through the host's [`Transport`].
//! Nothing is cached or retried, and server-reported failures are surfaced
//! as [`MediaError`] without recovery.

mod files;
mod folders;

use std::sync::Arc;

use atrium_sdk::TransportError;
use atrium_sdk::transport::{ApiRequest, ApiResponse, Transport};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};
use crate::model::Envelope;

pub use files::FileClient;
pub use folders::FolderClient;

/// Base path of the file endpoints.
pub const FILES_ENDPOINT: &str = "/api/media/files";

/// Base path of the folder endpoints.
pub const FOLDERS_ENDPOINT: &str = "/api/media/folders";

/// Entry point bundling the file and folder clients over one transport.
#[derive(Clone)]
pub struct MediaClient {
    files: FileClient,
    folders: FolderClient,
}

impl MediaClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            files: FileClient::new(Arc::clone(&transport)),
            folders: FolderClient::new(transport),
        }
    }

    pub fn files(&self) -> &FileClient {
        &self.files
    }

    pub fn folders(&self) -> &FolderClient {
        &self.folders
    }
}

/// Which resource a request targets, for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target {
    pub resource: &'static str,
    pub id: Option<i64>,
}

impl Target {
    pub fn collection(resource: &'static str) -> Self {
        Self { resource, id: None }
    }

    pub fn entity(resource: &'static str, id: i64) -> Self {
        Self {
            resource,
            id: Some(id),
        }
    }
}

/// Send a request and return the response if its status is a success.
pub(crate) async fn send(
    transport: &dyn Transport,
    request: ApiRequest,
    target: Target,
) -> MediaResult<ApiResponse> {
    let method = request.method;
    let path = request.path.clone();

    let response = transport.send(request).await?;
    debug!(%method, %path, status = response.status, "media request");

    if response.is_success() {
        return Ok(response);
    }

    warn!(%method, %path, status = response.status, "media request rejected");
    Err(match response.status {
        404 => match target.id {
            Some(id) => MediaError::NotFound {
                resource: target.resource,
                id,
            },
            None => TransportError::Status {
                status: response.status,
                body: response.text(),
            }
            .into(),
        },
        400 | 422 => MediaError::from_validation_body(&response.body),
        status => TransportError::Status {
            status,
            body: response.text(),
        }
        .into(),
    })
}

/// Send a request and unwrap its `{ data: T }` envelope.
pub(crate) async fn fetch<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
    target: Target,
) -> MediaResult<T> {
    let response = send(transport, request, target).await?;
    let envelope: Envelope<T> = serde_json::from_slice(&response.body)?;
    Ok(envelope.data)
}
