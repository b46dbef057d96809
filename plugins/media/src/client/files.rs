//! File endpoints.

use std::sync::Arc;

use atrium_sdk::transport::{ApiRequest, Part, Transport};

use super::{FILES_ENDPOINT, Target, fetch, send};
use crate::error::MediaResult;
use crate::model::{File, FileUpdate, Upload};

const RESOURCE: &str = "file";

/// CRUD operations on media files.
#[derive(Clone)]
pub struct FileClient {
    transport: Arc<dyn Transport>,
}

impl FileClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List files, optionally only those in `folder_id`.
    ///
    /// Order is whatever the server delivers.
    pub async fn list(&self, folder_id: Option<i64>) -> MediaResult<Vec<File>> {
        let mut request = ApiRequest::get(FILES_ENDPOINT);
        if let Some(folder_id) = folder_id {
            request = request.query("folder_id", folder_id);
        }
        fetch(&*self.transport, request, Target::collection(RESOURCE)).await
    }

    pub async fn get(&self, id: i64) -> MediaResult<File> {
        let request = ApiRequest::get(format!("{FILES_ENDPOINT}/{id}"));
        fetch(&*self.transport, request, Target::entity(RESOURCE, id)).await
    }

    /// Upload a file as `multipart/form-data`.
    ///
    /// `folder_id` is only sent when set and `description` only when
    /// non-empty.
    pub async fn upload(&self, upload: Upload) -> MediaResult<File> {
        let mut parts = vec![Part::File {
            name: "file".into(),
            filename: upload.filename,
            mime_type: upload.mime_type,
            bytes: upload.bytes,
        }];
        if let Some(folder_id) = upload.folder_id {
            parts.push(Part::Text {
                name: "folder_id".into(),
                value: folder_id.to_string(),
            });
        }
        if let Some(description) = upload.description.filter(|d| !d.is_empty()) {
            parts.push(Part::Text {
                name: "description".into(),
                value: description,
            });
        }

        let request = ApiRequest::post(FILES_ENDPOINT).multipart(parts);
        fetch(&*self.transport, request, Target::collection(RESOURCE)).await
    }

    /// Change only the fields set in `update`.
    pub async fn update(&self, id: i64, update: &FileUpdate) -> MediaResult<File> {
        let request = ApiRequest::put(format!("{FILES_ENDPOINT}/{id}")).json(update)?;
        fetch(&*self.transport, request, Target::entity(RESOURCE, id)).await
    }

    pub async fn delete(&self, id: i64) -> MediaResult<()> {
        let request = ApiRequest::delete(format!("{FILES_ENDPOINT}/{id}"));
        send(&*self.transport, request, Target::entity(RESOURCE, id)).await?;
        Ok(())
    }
}
