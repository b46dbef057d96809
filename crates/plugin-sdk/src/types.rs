//! Core types for Atrium plugins.
//!
//! These types describe what a plugin hands to the host besides menu
//! entries.

use serde::{Deserialize, Serialize};

/// A navigable route contributed by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// URL path pattern (e.g., "/media", "/media/folders/:id").
    pub path: String,
    /// Route name, unique per host (e.g., "media-folders").
    pub name: String,
    /// View the host renders for this route.
    pub view: String,
    /// Page title.
    pub title: String,
    /// Whether the host router must require an authenticated session.
    #[serde(default)]
    pub requires_auth: bool,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            view: name.clone(),
            title: name.clone(),
            name,
            requires_auth: false,
        }
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = view.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}
