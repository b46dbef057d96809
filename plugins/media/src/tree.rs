//! Folder hierarchy checks and navigation.
//!
//! Everything here is pure: the functions work on folder lists already
//! fetched from the backend and never talk to the network.

use std::collections::{HashMap, HashSet};

use atrium_sdk::TreeInvariantViolation;

use crate::model::{File, Folder};

pub use atrium_sdk::menu::effective_order;

/// Whether `id` is a usable parent or folder reference.
///
/// `None` (root level / unfiled) is always valid.
pub fn is_valid_folder_ref(folders: &[Folder], id: Option<i64>) -> bool {
    match id {
        None => true,
        Some(id) => folders.iter().any(|f| f.id == Some(id)),
    }
}

/// Whether no folder is its own ancestor.
pub fn is_acyclic(folders: &[Folder]) -> bool {
    first_cycle(&parent_index(folders)).is_none()
}

/// Check that `folders` form a forest: unique ids, no dangling parent
/// references, no cycles.
pub fn check_forest(folders: &[Folder]) -> Result<(), TreeInvariantViolation> {
    let mut seen = HashSet::new();
    for id in folders.iter().filter_map(|f| f.id) {
        if !seen.insert(id) {
            return Err(TreeInvariantViolation::DuplicateId { id: id.to_string() });
        }
    }

    for folder in folders {
        if let Some(parent) = folder.parent_id
            && !seen.contains(&parent)
        {
            return Err(TreeInvariantViolation::DanglingReference {
                id: folder_label(folder),
                parent: parent.to_string(),
            });
        }
    }

    match first_cycle(&parent_index(folders)) {
        Some(id) => Err(TreeInvariantViolation::Cycle { id: id.to_string() }),
        None => Ok(()),
    }
}

/// Check that every filed file points at a folder in `folders`.
pub fn check_file_refs(folders: &[Folder], files: &[File]) -> Result<(), TreeInvariantViolation> {
    for file in files {
        if !is_valid_folder_ref(folders, file.folder_id) {
            return Err(TreeInvariantViolation::DanglingReference {
                id: file
                    .id
                    .map_or_else(|| file.filename.clone(), |id| id.to_string()),
                parent: file.folder_id.map(|id| id.to_string()).unwrap_or_default(),
            });
        }
    }
    Ok(())
}

fn folder_label(folder: &Folder) -> String {
    folder
        .id
        .map_or_else(|| folder.name.clone(), |id| id.to_string())
}

fn parent_index(folders: &[Folder]) -> HashMap<i64, Option<i64>> {
    folders
        .iter()
        .filter_map(|f| f.id.map(|id| (id, f.parent_id)))
        .collect()
}

/// Walk up from every folder; return the first id found on a loop.
fn first_cycle(parents: &HashMap<i64, Option<i64>>) -> Option<i64> {
    let mut cleared: HashSet<i64> = HashSet::new();

    let mut starts: Vec<i64> = parents.keys().copied().collect();
    starts.sort_unstable();

    for start in starts {
        let mut path = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if cleared.contains(&id) {
                break;
            }
            if !path.insert(id) {
                return Some(id);
            }
            current = parents.get(&id).copied().flatten();
        }
        cleared.extend(path);
    }
    None
}

/// Read-only index over a folder list for browsing.
///
/// Children keep the order the server delivered them in.
#[derive(Debug)]
pub struct FolderTree<'a> {
    by_id: HashMap<i64, &'a Folder>,
    children: HashMap<Option<i64>, Vec<&'a Folder>>,
}

impl<'a> FolderTree<'a> {
    pub fn new(folders: &'a [Folder]) -> Self {
        let mut by_id = HashMap::new();
        let mut children: HashMap<Option<i64>, Vec<&'a Folder>> = HashMap::new();

        for folder in folders {
            if let Some(id) = folder.id {
                by_id.insert(id, folder);
            }
            children.entry(folder.parent_id).or_default().push(folder);
        }

        Self { by_id, children }
    }

    pub fn get(&self, id: i64) -> Option<&'a Folder> {
        self.by_id.get(&id).copied()
    }

    /// Folders at the root level.
    pub fn roots(&self) -> &[&'a Folder] {
        self.children_of(None)
    }

    /// Direct children of `parent` (`None` = root level).
    pub fn children_of(&self, parent: Option<i64>) -> &[&'a Folder] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ancestors of `id`, nearest first. Stops at a missing parent or a loop.
    pub fn ancestors(&self, id: i64) -> Vec<&'a Folder> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = self.get(id).and_then(|f| f.parent_id);

        while let Some(parent_id) = current {
            if !visited.insert(parent_id) {
                break;
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            out.push(parent);
            current = parent.parent_id;
        }
        out
    }

    /// The folder and its ancestors, root first.
    pub fn breadcrumb(&self, id: i64) -> Vec<&'a Folder> {
        let mut trail = self.ancestors(id);
        trail.reverse();
        if let Some(folder) = self.get(id) {
            trail.push(folder);
        }
        trail
    }

    /// Folder names from the root down, joined by `/` (e.g., "/Photos/2024").
    pub fn materialized_path(&self, id: i64) -> Option<String> {
        self.get(id)?;
        let names: Vec<&str> = self
            .breadcrumb(id)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        Some(format!("/{}", names.join("/")))
    }

    /// All folders below `id`, depth first, in delivery order.
    pub fn descendants(&self, id: i64) -> Vec<&'a Folder> {
        let mut out = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut stack: Vec<&'a Folder> = self.children_of(Some(id)).iter().rev().copied().collect();

        while let Some(folder) = stack.pop() {
            if let Some(fid) = folder.id {
                if !visited.insert(fid) {
                    continue;
                }
                stack.extend(self.children_of(Some(fid)).iter().rev().copied());
            }
            out.push(folder);
        }
        out
    }

    /// Whether `id` may be moved under `new_parent` without creating a loop
    /// or pointing at an unknown folder.
    pub fn can_move(&self, id: i64, new_parent: Option<i64>) -> bool {
        let Some(parent) = new_parent else {
            return true;
        };
        if parent == id || self.get(parent).is_none() {
            return false;
        }
        !self.ancestors(parent).iter().any(|f| f.id == Some(id))
    }
}
