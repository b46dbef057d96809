//! Route table - maps request paths to plugin views.
//!
//! Only the table lives here; enforcing `requires_auth` is the job of the
//! router that consults it.

use std::collections::HashMap;

use atrium_sdk::types::RouteDefinition;
use tracing::{debug, warn};

/// Result of matching a path against registered routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched route.
    pub route: RouteDefinition,
    /// Plugin that registered the route.
    pub plugin: String,
    /// Path parameters extracted (e.g., {"id": "7"})
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct Entry {
    plugin: String,
    route: RouteDefinition,
}

/// Routes from all plugins, most specific first.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin's routes. A path that is already taken is skipped.
    pub fn register(&mut self, plugin: &str, routes: Vec<RouteDefinition>) {
        for route in routes {
            if let Some(existing) = self.entries.iter().find(|e| e.route.path == route.path) {
                warn!(
                    plugin = %plugin,
                    path = %route.path,
                    owner = %existing.plugin,
                    "route path already registered, skipping"
                );
                continue;
            }
            self.entries.push(Entry {
                plugin: plugin.to_string(),
                route,
            });
        }

        // Fewer params first, then deeper paths first
        self.entries.sort_by_key(|e| {
            let param_count = e.route.path.matches(':').count();
            let segment_count = e.route.path.matches('/').count();
            (param_count, std::cmp::Reverse(segment_count))
        });

        debug!(routes = self.entries.len(), "built route table");
    }

    /// Match a request path against registered routes.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.entries.iter().find_map(|entry| {
            match_pattern(&entry.route.path, path).map(|params| RouteMatch {
                route: entry.route.clone(),
                plugin: entry.plugin.clone(),
                params,
            })
        })
    }

    /// Get a route by its name.
    pub fn by_name(&self, name: &str) -> Option<&RouteDefinition> {
        self.entries
            .iter()
            .map(|e| &e.route)
            .find(|r| r.name == name)
    }

    /// All routes with their owning plugin, in match order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &RouteDefinition)> {
        self.entries.iter().map(|e| (e.plugin.as_str(), &e.route))
    }

    /// Get route count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/media/folders/:id"
/// Path: "/media/folders/7"
/// Result: Some({"id": "7"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}
