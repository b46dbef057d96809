//! Media entries for the admin navigation.
//!
//! The media plugin only touches the `admin` menu. It contributes one
//! top-level "Media" entry with "Files" and "Folders" below it, either as a
//! single pre-built subtree ([`InjectionPolicy::Flat`]) or by attaching each
//! entry through the host's `add_item` primitive
//! ([`InjectionPolicy::Delegated`]). Both end in the same tree.

use std::fmt;
use std::str::FromStr;

use atrium_sdk::menu::{MenuContributor, MenuNode};
use tracing::debug;

/// Menu the media entries are added to.
pub const ADMIN_MENU: &str = "admin";

/// Id of the top-level media entry.
pub const MEDIA_MENU_ID: &str = "media-management";

/// Sort order of the top-level media entry.
pub const MEDIA_MENU_ORDER: i32 = 50;

/// How the media subtree is merged into the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InjectionPolicy {
    /// Upsert the top-level entry with its children already attached.
    Flat,
    /// Upsert the bare top-level entry, then attach each child through
    /// [`MenuNode::add_item`].
    #[default]
    Delegated,
}

impl FromStr for InjectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "delegated" => Ok(Self::Delegated),
            other => Err(format!(
                "unknown menu injection policy '{other}', expected 'flat' or 'delegated'"
            )),
        }
    }
}

impl fmt::Display for InjectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("flat"),
            Self::Delegated => f.write_str("delegated"),
        }
    }
}

/// Label, icon and route of the top-level entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMenuConfig {
    pub label: String,
    pub icon: String,
    pub route: String,
}

impl Default for MediaMenuConfig {
    fn default() -> Self {
        Self {
            label: "Media".into(),
            icon: "folder-open".into(),
            route: "/media".into(),
        }
    }
}

/// Contributes the media entries to the admin menu.
#[derive(Debug, Clone, Default)]
pub struct MediaMenu {
    policy: InjectionPolicy,
    config: MediaMenuConfig,
}

impl MediaMenu {
    pub fn new(policy: InjectionPolicy) -> Self {
        Self {
            policy,
            config: MediaMenuConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MediaMenuConfig) -> Self {
        self.config = config;
        self
    }

    pub fn policy(&self) -> InjectionPolicy {
        self.policy
    }

    /// The top-level entry without children.
    fn root_item(&self) -> MenuNode {
        MenuNode::new(MEDIA_MENU_ID, &self.config.label)
            .path(&self.config.route)
            .icon(&self.config.icon)
            .order(MEDIA_MENU_ORDER)
    }

    fn child_items(&self) -> Vec<MenuNode> {
        vec![
            MenuNode::new("media-files", "Files")
                .path(&self.config.route)
                .icon("image")
                .order(10),
            MenuNode::new("media-folders", "Folders")
                .path(format!("{}/folders", self.config.route))
                .icon("folders")
                .order(20),
        ]
    }

    fn inject_flat(&self, mut menu: MenuNode) -> MenuNode {
        let mut item = self.root_item();
        item.children = self.child_items();
        menu.upsert_child(item);
        menu
    }

    fn inject_delegated(&self, mut menu: MenuNode) -> MenuNode {
        if let Err(violation) = menu.add_item(None, self.root_item()) {
            panic!("media menu: {violation}");
        }
        for child in self.child_items() {
            if let Err(violation) = menu.add_item(Some(MEDIA_MENU_ID), child) {
                panic!("media menu: {violation}");
            }
        }
        menu
    }
}

impl MenuContributor for MediaMenu {
    fn name(&self) -> &str {
        "media"
    }

    fn contribute(&self, menu: MenuNode, menu_name: &str) -> MenuNode {
        if menu_name != ADMIN_MENU {
            return menu;
        }

        debug!(policy = %self.policy, root = %menu.id, "adding media menu entries");
        match self.policy {
            InjectionPolicy::Flat => self.inject_flat(menu),
            InjectionPolicy::Delegated => self.inject_delegated(menu),
        }
    }
}
