//! Item addressing: structural paths and drop-container ids
//!
//! The UI names drop targets by container id (`"bookmarks"` for the tab root,
//! `"folder-<id>"` for a folder) plus an index. [`resolve`] turns that into an
//! [`ItemPath`] against the *current* children, so it must be called again after
//! every structural change.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::tree::folder_index;
use crate::domain::{DomainError, DomainResult, Item};

/// Container id of the active tab's root list.
pub const ROOT_CONTAINER: &str = "bookmarks";

/// Prefix of a folder's container id.
pub const FOLDER_CONTAINER_PREFIX: &str = "folder-";

/// Location of an item within the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemPath {
    /// Direct child of the tab.
    Root(usize),
    /// Child `.1` of the folder at root index `.0`.
    InFolder(usize, usize),
}

impl ItemPath {
    /// Container id and index the UI would report for this path.
    ///
    /// Returns `None` when the folder index does not address a folder.
    pub fn location(&self, children: &[Item]) -> Option<(ContainerId, usize)> {
        match *self {
            ItemPath::Root(index) => Some((ContainerId::Root, index)),
            ItemPath::InFolder(folder, index) => {
                let folder = children.get(folder)?.as_folder()?;
                Some((ContainerId::Folder(folder.id.clone()), index))
            }
        }
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemPath::Root(index) => write!(f, "[{}]", index),
            ItemPath::InFolder(folder, index) => write!(f, "[{}].children[{}]", folder, index),
        }
    }
}

/// Parsed drop-container id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Root,
    Folder(String),
}

impl FromStr for ContainerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ROOT_CONTAINER {
            return Ok(ContainerId::Root);
        }
        match s.strip_prefix(FOLDER_CONTAINER_PREFIX) {
            Some(id) if !id.is_empty() => Ok(ContainerId::Folder(id.to_string())),
            _ => Err(DomainError::InvalidContainer(s.to_string())),
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Root => f.write_str(ROOT_CONTAINER),
            ContainerId::Folder(id) => write!(f, "{}{}", FOLDER_CONTAINER_PREFIX, id),
        }
    }
}

/// Resolve a container id and index into a path against `children`.
///
/// A folder container that no longer exists, or that names a bookmark, is an
/// invalid destination. The index itself is not bounds-checked here; extraction
/// and insertion apply their own rules.
pub fn resolve(children: &[Item], container: &ContainerId, index: usize) -> DomainResult<ItemPath> {
    let path = match container {
        ContainerId::Root => ItemPath::Root(index),
        ContainerId::Folder(folder_id) => {
            let folder = folder_index(children, folder_id).ok_or_else(|| {
                DomainError::InvalidDestination(format!("folder {} does not exist", folder_id))
            })?;
            ItemPath::InFolder(folder, index)
        }
    };
    debug!("resolve: {}@{} -> {}", container, index, path);
    Ok(path)
}

/// Parse a raw container id and resolve it in one step.
pub fn resolve_raw(children: &[Item], container_id: &str, index: usize) -> DomainResult<ItemPath> {
    let container: ContainerId = container_id.parse()?;
    resolve(children, &container, index)
}
