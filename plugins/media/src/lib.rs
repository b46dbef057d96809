//! Media plugin for Atrium.
//!
//! Organizes uploaded files into nested folders and contributes the
//! "Media" entries to the admin navigation. The plugin owns:
//!
//! - the folder/file records and their tree rules ([`model`], [`tree`])
//! - the HTTP resource client for `/api/media/*` ([`client`])
//! - its admin menu entries ([`menu`]) and routes ([`routes`])

pub mod client;
pub mod error;
pub mod menu;
pub mod model;
pub mod routes;
pub mod tree;

pub use client::{FileClient, FolderClient, MediaClient};
pub use error::{MediaError, MediaResult};
pub use menu::{InjectionPolicy, MediaMenu, MediaMenuConfig};
pub use model::{File, FileUpdate, Folder, FolderUpdate, NewFolder, Upload};
