//! Drag-end interpretation: one terminal gesture becomes one extract + insert.
//!
//! Application order is fixed. Extraction runs first, and the destination is
//! resolved against the shrunken list afterwards. Moving index 2 to index 0
//! within one container therefore removes index 2, then inserts at index 0 of
//! the shorter list.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::mutation::{extract, insert, Refused};
use crate::domain::path::resolve_raw;
use crate::domain::tree::{find_path, id_at};
use crate::domain::{DomainError, Item, ItemPath};

/// Container id and index reported by the UI for one end of a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropLocation {
    pub container_id: String,
    pub index: usize,
}

impl DropLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// Completed drag gesture. `destination` is `None` when the drop landed
/// outside every container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub dragged_item_id: String,
    pub source: DropLocation,
    pub destination: Option<DropLocation>,
}

/// Why a command left the tree untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// Drop outside any container.
    Cancelled,
    /// Destination equals source.
    SamePosition,
    /// Referenced item, folder or tab no longer exists.
    NotFound(String),
    /// Destination does not resolve or would nest a folder.
    InvalidDestination(String),
    /// Other refusal (e.g. deleting the last tab).
    Refused(String),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::Cancelled => write!(f, "dropped outside any container"),
            Skip::SamePosition => write!(f, "already at that position"),
            Skip::NotFound(msg) | Skip::InvalidDestination(msg) | Skip::Refused(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl From<DomainError> for Skip {
    fn from(err: DomainError) -> Self {
        if err.is_not_found() {
            return Skip::NotFound(err.to_string());
        }
        match err {
            DomainError::InvalidDestination(_) | DomainError::InvalidContainer(_) => {
                Skip::InvalidDestination(err.to_string())
            }
            _ => Skip::Refused(err.to_string()),
        }
    }
}

/// A committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub from: ItemPath,
    pub to: ItemPath,
}

/// Apply `event` to `children`. All or nothing: on `Err` the children are
/// exactly as they were.
pub fn apply_drag_end(children: &mut Vec<Item>, event: &DragEnd) -> Result<Moved, Skip> {
    let destination = event.destination.as_ref().ok_or(Skip::Cancelled)?;
    if *destination == event.source {
        return Err(Skip::SamePosition);
    }

    let from = source_path(children, event)?;
    let item = extract(children, from)?;
    debug!("apply_drag_end: extracted {} from {}", item.id(), from);

    let to = match resolve_raw(children, &destination.container_id, destination.index) {
        Ok(path) => path,
        Err(err) => {
            restore(children, from, item);
            return Err(err.into());
        }
    };

    match insert(children, to, item) {
        Ok(()) => {
            debug!("apply_drag_end: inserted {} at {}", event.dragged_item_id, to);
            Ok(Moved { from, to })
        }
        Err(Refused { error, item }) => {
            restore(children, from, item);
            Err(error.into())
        }
    }
}

/// Source location as reported, cross-checked against the dragged id. Stale
/// indices fall back to a lookup by id.
fn source_path(children: &[Item], event: &DragEnd) -> Result<ItemPath, Skip> {
    let reported = resolve_raw(children, &event.source.container_id, event.source.index).ok();
    if let Some(path) = reported {
        if id_at(children, path) == Some(event.dragged_item_id.as_str()) {
            return Ok(path);
        }
    }
    debug!(
        "source_path: {:?} does not hold {}, searching by id",
        event.source, event.dragged_item_id
    );
    find_path(children, &event.dragged_item_id)
        .ok_or_else(|| DomainError::ItemNotFound(event.dragged_item_id.clone()).into())
}

/// Put an extracted item back where it came from.
fn restore(children: &mut Vec<Item>, from: ItemPath, item: Item) {
    if let Err(refused) = insert(children, from, item) {
        // Unreachable for a path that was just extracted from.
        error!("restore: could not reinstate {} at {}: {}", refused.item.id(), from, refused.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::{count_items, occurrences};
    use crate::domain::{Bookmark, Folder, GridSize};
    use rstest::rstest;

    fn bookmark(id: &str) -> Item {
        Item::Bookmark(Bookmark {
            id: id.into(),
            title: id.into(),
            ..Default::default()
        })
    }

    fn folder(id: &str, children: &[&str]) -> Item {
        let mut f = Folder::new(id, id, GridSize::default());
        f.children = children
            .iter()
            .map(|c| Bookmark {
                id: c.to_string(),
                ..Default::default()
            })
            .collect();
        Item::Folder(f)
    }

    fn drag(id: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DragEnd {
        DragEnd {
            dragged_item_id: id.into(),
            source: DropLocation::new(from.0, from.1),
            destination: to.map(|(c, i)| DropLocation::new(c, i)),
        }
    }

    fn ids(children: &[Item]) -> Vec<&str> {
        children.iter().map(Item::id).collect()
    }

    fn folder_ids(item: &Item) -> Vec<&str> {
        item.as_folder()
            .unwrap()
            .children
            .iter()
            .map(|b| b.id.as_str())
            .collect()
    }

    #[test]
    fn given_root_bookmark_when_dropped_into_folder_then_becomes_first_child() {
        let mut children = vec![bookmark("B1"), folder("F1", &["B2"])];

        let moved =
            apply_drag_end(&mut children, &drag("B1", ("bookmarks", 0), Some(("folder-F1", 0))))
                .unwrap();

        assert_eq!(ids(&children), ["F1"]);
        assert_eq!(folder_ids(&children[0]), ["B1", "B2"]);
        assert_eq!(moved.from, ItemPath::Root(0));
        // folder index is resolved after extraction
        assert_eq!(moved.to, ItemPath::InFolder(0, 0));
    }

    #[test]
    fn given_same_container_reorder_when_moving_last_to_first_then_rotates() {
        let mut children = vec![bookmark("A"), bookmark("B"), bookmark("C")];
        apply_drag_end(&mut children, &drag("C", ("bookmarks", 2), Some(("bookmarks", 0)))).unwrap();
        assert_eq!(ids(&children), ["C", "A", "B"]);
    }

    #[test]
    fn given_folder_reorder_when_moving_first_to_last_then_rotates_inside_folder() {
        let mut children = vec![bookmark("a"), folder("F1", &["x", "y", "z"])];

        apply_drag_end(&mut children, &drag("x", ("folder-F1", 0), Some(("folder-F1", 2))))
            .unwrap();

        assert_eq!(ids(&children), ["a", "F1"]);
        assert_eq!(folder_ids(&children[1]), ["y", "z", "x"]);
    }

    #[test]
    fn given_folder_child_when_dragged_to_root_then_leaves_folder_empty() {
        let mut children = vec![folder("F1", &["B2"])];
        apply_drag_end(&mut children, &drag("B2", ("folder-F1", 0), Some(("bookmarks", 0)))).unwrap();
        assert_eq!(ids(&children), ["B2", "F1"]);
        assert!(folder_ids(&children[1]).is_empty());
    }

    #[test]
    fn given_folder_when_dropped_into_other_folder_then_unchanged_and_invalid_destination() {
        let mut children = vec![folder("F1", &["x"]), folder("F2", &["y"])];
        let before = children.clone();

        let skip =
            apply_drag_end(&mut children, &drag("F1", ("bookmarks", 0), Some(("folder-F2", 0))))
                .unwrap_err();

        assert!(matches!(skip, Skip::InvalidDestination(_)));
        assert_eq!(children, before);
    }

    #[test]
    fn given_folder_when_dropped_into_itself_then_unchanged() {
        let mut children = vec![bookmark("a"), folder("F1", &["x"])];
        let before = children.clone();
        let skip =
            apply_drag_end(&mut children, &drag("F1", ("bookmarks", 1), Some(("folder-F1", 0))))
                .unwrap_err();
        assert!(matches!(skip, Skip::InvalidDestination(_)));
        assert_eq!(children, before);
    }

    #[test]
    fn given_folder_when_reordered_at_root_then_moves_with_children() {
        let mut children = vec![bookmark("a"), bookmark("b"), folder("F1", &["x", "y"])];
        apply_drag_end(&mut children, &drag("F1", ("bookmarks", 2), Some(("bookmarks", 0)))).unwrap();
        assert_eq!(ids(&children), ["F1", "a", "b"]);
        assert_eq!(folder_ids(&children[0]), ["x", "y"]);
    }

    #[test]
    fn given_cancelled_drop_when_applying_then_cancelled() {
        let mut children = vec![bookmark("a")];
        let skip = apply_drag_end(&mut children, &drag("a", ("bookmarks", 0), None)).unwrap_err();
        assert_eq!(skip, Skip::Cancelled);
    }

    #[test]
    fn given_identical_source_and_destination_when_applying_then_same_position() {
        let mut children = vec![bookmark("a"), bookmark("b")];
        let before = children.clone();
        let skip =
            apply_drag_end(&mut children, &drag("b", ("bookmarks", 1), Some(("bookmarks", 1))))
                .unwrap_err();
        assert_eq!(skip, Skip::SamePosition);
        assert_eq!(children, before);
    }

    #[test]
    fn given_deleted_item_when_applying_then_not_found() {
        let mut children = vec![bookmark("a")];
        let skip =
            apply_drag_end(&mut children, &drag("gone", ("bookmarks", 3), Some(("bookmarks", 0))))
                .unwrap_err();
        assert!(matches!(skip, Skip::NotFound(_)));
    }

    #[test]
    fn given_stale_source_index_when_applying_then_locates_item_by_id() {
        let mut children = vec![bookmark("a"), bookmark("b"), bookmark("c")];
        apply_drag_end(&mut children, &drag("c", ("bookmarks", 0), Some(("bookmarks", 1)))).unwrap();
        assert_eq!(ids(&children), ["a", "c", "b"]);
    }

    #[test]
    fn given_missing_destination_folder_when_applying_then_item_restored() {
        let mut children = vec![bookmark("a"), folder("F1", &["x", "y"])];
        let before = children.clone();
        let skip =
            apply_drag_end(&mut children, &drag("y", ("folder-F1", 1), Some(("folder-gone", 0))))
                .unwrap_err();
        assert!(matches!(skip, Skip::InvalidDestination(_)));
        assert_eq!(children, before);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(0, 4)]
    #[case(4, 0)]
    #[case(1, 3)]
    #[case(3, 1)]
    fn given_reorder_when_moving_then_relative_order_of_others_is_kept(
        #[case] from: usize,
        #[case] to: usize,
    ) {
        let names = ["a", "b", "c", "d", "e"];
        let mut children: Vec<Item> = names.iter().map(|n| bookmark(n)).collect();
        let moved_id = names[from];

        apply_drag_end(&mut children, &drag(moved_id, ("bookmarks", from), Some(("bookmarks", to))))
            .unwrap();

        assert_eq!(children[to].id(), moved_id);
        let others: Vec<&str> = ids(&children).into_iter().filter(|id| *id != moved_id).collect();
        let expected: Vec<&str> = names.iter().copied().filter(|id| *id != moved_id).collect();
        assert_eq!(others, expected);
    }

    #[rstest]
    #[case(drag("a", ("bookmarks", 0), Some(("folder-F1", 1))))]
    #[case(drag("x", ("folder-F1", 0), Some(("folder-F2", 0))))]
    #[case(drag("y", ("folder-F1", 1), Some(("bookmarks", 3))))]
    #[case(drag("F2", ("bookmarks", 2), Some(("bookmarks", 0))))]
    #[case(drag("F1", ("bookmarks", 1), Some(("folder-F2", 0))))]
    fn given_any_move_when_applying_then_items_are_conserved(#[case] event: DragEnd) {
        let mut children = vec![bookmark("a"), folder("F1", &["x", "y"]), folder("F2", &["z"])];
        let total = count_items(&children);

        let _ = apply_drag_end(&mut children, &event);

        assert_eq!(count_items(&children), total);
        assert_eq!(occurrences(&children, &event.dragged_item_id), 1);
        for item in &children {
            if let Item::Folder(f) = item {
                // Folder.children only holds bookmarks; the id set says the same
                assert!(f.children.iter().all(|b| b.id != "F1" && b.id != "F2"));
            }
        }
    }
}
