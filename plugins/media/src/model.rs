//! Media folder and file records as exchanged with the backend.
//!
//! `parent_id` and `folder_id` are the authoritative relations. The hydrated
//! `parent`, `children`, `files` and `folder` fields are only present when
//! the server chooses to embed them; they are owned copies and must not be
//! used to decide identity or ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Server-assigned identifier, absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name (required, non-empty).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent folder (None = root level).
    #[serde(default)]
    pub parent_id: Option<i64>,

    /// Materialized path for display, not identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Folder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Folder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<File>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// A folder that has not been created yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            parent_id: None,
            path: None,
            parent: None,
            children: None,
            files: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Uploaded file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display name.
    pub name: String,

    /// Original upload filename.
    pub filename: String,

    /// Storage path on the server.
    pub path: String,

    pub mime_type: String,

    /// Size in bytes.
    pub size: u64,

    /// Owning folder (None = unfiled).
    #[serde(default)]
    pub folder_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pixel width, images only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, images only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Uploading user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Box<Folder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl File {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Input for creating a folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewFolder {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Partial folder update. Only supplied fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` moves the folder to the root level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FolderUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial file update. Only supplied fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` unfiles the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A file to upload. The bytes are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub folder_id: Option<i64>,
    pub description: Option<String>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
            folder_id: None,
            description: None,
        }
    }

    pub fn folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `{ "data": T }` envelope used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn folder_parses_hydrated_children_and_timestamps() {
        let folder: Folder = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Photos",
            "parent_id": null,
            "path": "/Photos",
            "children": [{"id": 2, "name": "2024", "parent_id": 1}],
            "created_at": "2024-03-01T10:00:00.000000Z"
        }))
        .unwrap();

        assert!(folder.is_root());
        assert_eq!(folder.children.as_ref().unwrap()[0].parent_id, Some(1));
        assert!(folder.created_at.is_some());
    }

    #[test]
    fn file_parses_minimal_record() {
        let file: File = serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "logo",
            "filename": "logo.png",
            "path": "media/logo.png",
            "mime_type": "image/png",
            "size": 2048,
            "width": 64,
            "height": 64
        }))
        .unwrap();

        assert!(file.is_image());
        assert!(file.is_unfiled());
        assert_eq!(file.width, Some(64));
    }

    #[test]
    fn file_update_sends_only_supplied_fields() {
        let update = FileUpdate {
            description: Some("x".into()),
            ..FileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"description": "x"})
        );
    }

    #[test]
    fn file_update_can_unfile() {
        let update = FileUpdate {
            folder_id: Some(None),
            ..FileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"folder_id": null})
        );
    }

    #[test]
    fn new_folder_skips_unset_fields() {
        let folder = NewFolder::new("Docs").parent(3);
        assert_eq!(
            serde_json::to_value(&folder).unwrap(),
            serde_json::json!({"name": "Docs", "parent_id": 3})
        );
    }
}
