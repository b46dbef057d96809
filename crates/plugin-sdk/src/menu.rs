//! Navigation tree shared between the host and plugins.
//!
//! The host builds a [`MenuNode`] tree per render cycle and hands it to every
//! registered [`MenuContributor`]. Contributors never sort or deduplicate by
//! hand; they go through [`MenuNode::upsert_child`] or [`MenuNode::add_item`],
//! which keep every children list ordered by [`effective_order`] and free of
//! duplicate ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TreeInvariantViolation;

/// Sort key used for nodes without an explicit order.
pub const UNORDERED: i32 = i32::MAX;

/// A single entry in a navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Unique identifier within the tree (e.g., "media-management").
    pub id: String,

    /// Display text.
    pub title: String,

    /// Route target.
    #[serde(default)]
    pub path: String,

    /// Icon symbol name, opaque to the host (e.g., "folder-open").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Sort order (lower = earlier). Unset sorts after every set order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    /// Child entries, kept sorted by effective order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

/// The order a node sorts by: its explicit order, or [`UNORDERED`].
pub fn effective_order(node: &MenuNode) -> i32 {
    node.order.unwrap_or(UNORDERED)
}

impl MenuNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: String::new(),
            icon: None,
            order: None,
            children: Vec::new(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Append a child without sorting. Meant for building fixtures and base trees.
    pub fn child(mut self, child: MenuNode) -> Self {
        self.children.push(child);
        self
    }

    /// Insert `item` as a child of `self`, or update the node that already
    /// carries its id anywhere below `self`.
    ///
    /// An existing node keeps its place in the tree and takes over the
    /// incoming title, path, icon and order. The incoming children are then
    /// upserted one by one beneath it, so children attached by other
    /// contributors survive and every list touched ends up sorted. The sort
    /// is stable, so nodes with equal effective order keep their relative
    /// sequence.
    pub fn upsert_child(&mut self, item: MenuNode) {
        let parent = self.id.clone();
        self.place(&parent, item);
    }

    /// Insert `item` under the node with id `parent`, or under `self` when
    /// `parent` is `None`.
    ///
    /// This is the host's shared insertion primitive: plugins that only know
    /// the id of the entry they hang off use it instead of walking the tree.
    pub fn add_item(
        &mut self,
        parent: Option<&str>,
        item: MenuNode,
    ) -> Result<(), TreeInvariantViolation> {
        let parent = match parent {
            None => self.id.clone(),
            Some(id) if self.find(id).is_some() => id.to_string(),
            Some(id) => {
                return Err(TreeInvariantViolation::MissingParent {
                    id: item.id,
                    parent: id.to_string(),
                });
            }
        };
        self.place(&parent, item);
        Ok(())
    }

    /// Stable sort of the direct children by effective order.
    pub fn sort_children(&mut self) {
        self.children.sort_by_key(effective_order);
    }

    /// Depth-first search for a node by id, including `self`.
    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable depth-first search for a node by id, including `self`.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut MenuNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Number of nodes in the tree (including `self`) carrying `id`.
    pub fn count_id(&self, id: &str) -> usize {
        let own = usize::from(self.id == id);
        own + self.children.iter().map(|c| c.count_id(id)).sum::<usize>()
    }

    /// Verify tree-wide id uniqueness and per-level ordering.
    pub fn check_invariants(&self) -> Result<(), TreeInvariantViolation> {
        let mut seen = HashSet::new();
        self.check_node(&mut seen)
    }

    fn check_node<'a>(&'a self, seen: &mut HashSet<&'a str>) -> Result<(), TreeInvariantViolation> {
        if !seen.insert(self.id.as_str()) {
            return Err(TreeInvariantViolation::DuplicateId {
                id: self.id.clone(),
            });
        }
        let sorted = self
            .children
            .windows(2)
            .all(|pair| effective_order(&pair[0]) <= effective_order(&pair[1]));
        if !sorted {
            return Err(TreeInvariantViolation::UnsortedChildren {
                parent: self.id.clone(),
            });
        }
        self.children.iter().try_for_each(|c| c.check_node(seen))
    }

    /// Upsert `item` below the node `parent`, which must exist in `self`.
    fn place(&mut self, parent: &str, mut item: MenuNode) {
        let children = std::mem::take(&mut item.children);
        let id = item.id.clone();

        if self.id == id {
            self.assign(item);
        } else if let Some(holder) = self.holder_of_mut(&id) {
            if let Some(existing) = holder.children.iter_mut().find(|c| c.id == id) {
                existing.assign(item);
            }
            holder.sort_children();
        } else if let Some(target) = self.find_mut(parent) {
            target.children.push(item);
            target.sort_children();
        }

        for child in children {
            self.place(&id, child);
        }
    }

    /// The node whose direct children include `id`.
    fn holder_of_mut(&mut self, id: &str) -> Option<&mut MenuNode> {
        if self.children.iter().any(|c| c.id == id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.holder_of_mut(id))
    }

    fn assign(&mut self, incoming: MenuNode) {
        self.title = incoming.title;
        self.path = incoming.path;
        self.icon = incoming.icon;
        self.order = incoming.order;
    }
}

/// A feature module that augments a shared navigation tree.
///
/// `contribute` receives the tree being built for `menu_name` and returns the
/// tree the host should use from now on. Contributors must leave menus they
/// do not target untouched and must be safe to apply more than once.
pub trait MenuContributor: Send + Sync {
    /// Name of the contributing plugin, used in logs.
    fn name(&self) -> &str;

    fn contribute(&self, menu: MenuNode, menu_name: &str) -> MenuNode;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn ids(node: &MenuNode) -> Vec<&str> {
        node.children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn effective_order_defaults_to_max() {
        assert_eq!(effective_order(&MenuNode::new("a", "A")), i32::MAX);
        assert_eq!(effective_order(&MenuNode::new("a", "A").order(5)), 5);
    }

    #[test]
    fn upsert_sorts_with_unordered_last() {
        let mut root = MenuNode::new("root", "Root")
            .child(MenuNode::new("thirty", "30").order(30))
            .child(MenuNode::new("none", "None"))
            .child(MenuNode::new("ten", "10").order(10));

        root.upsert_child(MenuNode::new("fifty", "50").order(50));

        assert_eq!(ids(&root), vec!["ten", "thirty", "fifty", "none"]);
    }

    #[test]
    fn upsert_keeps_relative_order_of_ties() {
        let mut root = MenuNode::new("root", "Root")
            .child(MenuNode::new("b", "B"))
            .child(MenuNode::new("a", "A"))
            .child(MenuNode::new("x", "X").order(20))
            .child(MenuNode::new("y", "Y").order(20));

        root.upsert_child(MenuNode::new("c", "C"));

        assert_eq!(ids(&root), vec!["x", "y", "b", "a", "c"]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut root = MenuNode::new("root", "Root")
            .child(MenuNode::new("a", "A").order(10))
            .child(MenuNode::new("b", "B").order(10))
            .child(MenuNode::new("c", "C").order(10));

        root.upsert_child(MenuNode::new("a", "Renamed").order(10));

        assert_eq!(ids(&root), vec!["a", "b", "c"]);
        assert_eq!(root.children[0].title, "Renamed");
        assert_eq!(root.count_id("a"), 1);
    }

    #[test]
    fn upsert_merges_children_recursively() {
        let mut root = MenuNode::new("root", "Root").child(
            MenuNode::new("media", "Media")
                .order(50)
                .child(MenuNode::new("extra", "Extra").order(30)),
        );

        root.upsert_child(
            MenuNode::new("media", "Media")
                .order(50)
                .child(MenuNode::new("files", "Files").order(10)),
        );

        let media = root.find("media").unwrap();
        assert_eq!(ids(media), vec!["files", "extra"]);
    }

    #[test]
    fn new_subtree_children_are_sorted_on_insert() {
        let mut root = MenuNode::new("root", "Root");

        root.upsert_child(
            MenuNode::new("group", "Group")
                .order(5)
                .child(MenuNode::new("b", "B").order(20))
                .child(
                    MenuNode::new("a", "A")
                        .order(10)
                        .child(MenuNode::new("z", "Z"))
                        .child(MenuNode::new("y", "Y").order(1)),
                ),
        );

        let group = root.find("group").unwrap();
        assert_eq!(ids(group), vec!["a", "b"]);
        assert_eq!(ids(root.find("a").unwrap()), vec!["y", "z"]);
        assert!(root.check_invariants().is_ok());
    }

    #[test]
    fn upsert_updates_nested_node_with_same_id() {
        let mut root = MenuNode::new("root", "Root").child(
            MenuNode::new("content", "Content").order(20).child(
                MenuNode::new("media", "Old")
                    .order(5)
                    .child(MenuNode::new("extra", "Extra").order(30)),
            ),
        );

        root.upsert_child(
            MenuNode::new("media", "Media")
                .order(50)
                .child(MenuNode::new("files", "Files").order(10)),
        );

        assert_eq!(root.count_id("media"), 1);
        assert_eq!(ids(&root), vec!["content"]);
        let media = root.find("media").unwrap();
        assert_eq!(media.title, "Media");
        assert_eq!(ids(media), vec!["files", "extra"]);
        assert!(root.check_invariants().is_ok());
    }

    #[test]
    fn upsert_resorts_the_list_holding_an_updated_node() {
        let mut root = MenuNode::new("root", "Root").child(
            MenuNode::new("section", "Section")
                .child(MenuNode::new("a", "A").order(10))
                .child(MenuNode::new("b", "B").order(20)),
        );

        root.upsert_child(MenuNode::new("a", "A").order(30));

        assert_eq!(ids(root.find("section").unwrap()), vec!["b", "a"]);
        assert!(root.check_invariants().is_ok());
    }

    #[test]
    fn add_item_into_parent_found_elsewhere_keeps_ids_unique() {
        let mut root = MenuNode::new("root", "Root")
            .child(MenuNode::new("media", "Media").child(MenuNode::new("files", "Files")))
            .child(MenuNode::new("settings", "Settings"));

        root.add_item(Some("settings"), MenuNode::new("files", "Files").order(1))
            .unwrap();

        assert_eq!(root.count_id("files"), 1);
        assert_eq!(ids(root.find("media").unwrap()), vec!["files"]);
    }

    #[test]
    fn add_item_places_under_nested_parent() {
        let mut root = MenuNode::new("root", "Root")
            .child(MenuNode::new("admin", "Admin").child(MenuNode::new("users", "Users")));

        root.add_item(Some("users"), MenuNode::new("roles", "Roles"))
            .unwrap();

        let users = root.find("users").unwrap();
        assert_eq!(ids(users), vec!["roles"]);
    }

    #[test]
    fn add_item_reports_missing_parent() {
        let mut root = MenuNode::new("root", "Root");
        let err = root
            .add_item(Some("nowhere"), MenuNode::new("x", "X"))
            .unwrap_err();
        assert!(matches!(err, TreeInvariantViolation::MissingParent { .. }));
        assert!(root.children.is_empty());
    }

    #[test]
    fn check_invariants_flags_duplicates_anywhere() {
        let root = MenuNode::new("root", "Root")
            .child(MenuNode::new("a", "A").child(MenuNode::new("dup", "Dup")))
            .child(MenuNode::new("dup", "Dup"));

        let err = root.check_invariants().unwrap_err();
        assert_eq!(
            err,
            TreeInvariantViolation::DuplicateId {
                id: "dup".to_string()
            }
        );
    }

    #[test]
    fn check_invariants_flags_unsorted_children() {
        let root = MenuNode::new("root", "Root")
            .child(MenuNode::new("late", "Late"))
            .child(MenuNode::new("early", "Early").order(1));

        assert!(matches!(
            root.check_invariants(),
            Err(TreeInvariantViolation::UnsortedChildren { .. })
        ));
    }

    #[test]
    fn serializes_without_empty_fields() {
        let node = MenuNode::new("dashboard", "Dashboard").path("/").order(10);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "dashboard", "title": "Dashboard", "path": "/", "order": 10})
        );
    }
}
