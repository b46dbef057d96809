//! Folder endpoints.

use std::sync::Arc;

use atrium_sdk::transport::{ApiRequest, Transport};

use super::{FOLDERS_ENDPOINT, Target, fetch, send};
use crate::error::{MediaError, MediaResult};
use crate::model::{Folder, FolderUpdate, NewFolder};

const RESOURCE: &str = "folder";

/// CRUD operations on media folders.
#[derive(Clone)]
pub struct FolderClient {
    transport: Arc<dyn Transport>,
}

impl FolderClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List folders, optionally only the children of `parent_id`.
    pub async fn list(&self, parent_id: Option<i64>) -> MediaResult<Vec<Folder>> {
        let mut request = ApiRequest::get(FOLDERS_ENDPOINT);
        if let Some(parent_id) = parent_id {
            request = request.query("parent_id", parent_id);
        }
        fetch(&*self.transport, request, Target::collection(RESOURCE)).await
    }

    pub async fn get(&self, id: i64) -> MediaResult<Folder> {
        let request = ApiRequest::get(format!("{FOLDERS_ENDPOINT}/{id}"));
        fetch(&*self.transport, request, Target::entity(RESOURCE, id)).await
    }

    /// Create a folder. An empty name is rejected without a request.
    pub async fn create(&self, folder: &NewFolder) -> MediaResult<Folder> {
        require_name(&folder.name)?;
        let request = ApiRequest::post(FOLDERS_ENDPOINT).json(folder)?;
        fetch(&*self.transport, request, Target::collection(RESOURCE)).await
    }

    /// Change only the fields set in `update`.
    pub async fn update(&self, id: i64, update: &FolderUpdate) -> MediaResult<Folder> {
        if let Some(name) = &update.name {
            require_name(name)?;
        }
        if update.parent_id == Some(Some(id)) {
            return Err(MediaError::invalid_field(
                "parent_id",
                "a folder cannot be its own parent",
            ));
        }
        let request = ApiRequest::put(format!("{FOLDERS_ENDPOINT}/{id}")).json(update)?;
        fetch(&*self.transport, request, Target::entity(RESOURCE, id)).await
    }

    /// Delete a folder. What happens to its contents is up to the server.
    pub async fn delete(&self, id: i64) -> MediaResult<()> {
        let request = ApiRequest::delete(format!("{FOLDERS_ENDPOINT}/{id}"));
        send(&*self.transport, request, Target::entity(RESOURCE, id)).await?;
        Ok(())
    }
}

fn require_name(name: &str) -> MediaResult<()> {
    if name.trim().is_empty() {
        return Err(MediaError::invalid_field("name", "folder name is required"));
    }
    Ok(())
}
