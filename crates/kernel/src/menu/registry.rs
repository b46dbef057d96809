//! Menu registry - runs plugin contributors over the host's navigation trees.
//!
//! Each build starts from the host's base tree for the requested menu and
//! passes it through every contributor once, in weight order.

use std::sync::Arc;

use atrium_sdk::menu::{MenuContributor, MenuNode};
use tracing::debug;

/// A registered contributor with its priority.
#[derive(Clone)]
pub struct ContributorEntry {
    pub contributor: Arc<dyn MenuContributor>,
    /// Weight for ordering (lower = runs first).
    pub weight: i32,
}

impl std::fmt::Debug for ContributorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorEntry")
            .field("name", &self.contributor.name())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Registry of menu contributors.
#[derive(Debug, Default, Clone)]
pub struct MenuRegistry {
    contributors: Vec<ContributorEntry>,
}

impl MenuRegistry {
    /// Create an empty menu registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contributor. Equal weights run in registration order.
    pub fn register(&mut self, contributor: Arc<dyn MenuContributor>, weight: i32) {
        self.contributors.push(ContributorEntry {
            contributor,
            weight,
        });
        self.contributors.sort_by_key(|c| c.weight);
    }

    /// Build `menu_name` starting from `base`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the finished tree has duplicate ids or
    /// unsorted children. That is a bug in a contributor or in `base`.
    pub fn build(&self, menu_name: &str, base: MenuNode) -> MenuNode {
        let mut menu = base;
        for entry in &self.contributors {
            menu = entry.contributor.contribute(menu, menu_name);
            debug!(
                menu = %menu_name,
                contributor = %entry.contributor.name(),
                children = menu.children.len(),
                "menu contributor applied"
            );
        }

        if cfg!(debug_assertions)
            && let Err(violation) = menu.check_invariants()
        {
            panic!("menu '{menu_name}' is malformed: {violation}");
        }
        menu
    }

    /// Names of registered contributors, in the order they run.
    pub fn contributor_names(&self) -> Vec<&str> {
        self.contributors
            .iter()
            .map(|c| c.contributor.name())
            .collect()
    }

    /// Get contributor count.
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}
