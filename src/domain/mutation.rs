//! Structural primitives on a working copy of a tab's children.
//!
//! Both primitives shift siblings like `Vec::remove` / `Vec::insert`. Callers
//! that chain them must re-resolve paths in between: extraction changes the
//! indices of everything after the removed item.

use crate::domain::{DomainError, DomainResult, Item, ItemPath};

/// An insertion that was refused. Carries the item back to the caller so it can
/// be restored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refused {
    pub error: DomainError,
    pub item: Item,
}

/// Remove and return the item at `path`.
///
/// Removing from a folder touches only that folder's children.
pub fn extract(children: &mut Vec<Item>, path: ItemPath) -> DomainResult<Item> {
    match path {
        ItemPath::Root(index) => {
            if index >= children.len() {
                return Err(DomainError::NoItemAt(path));
            }
            Ok(children.remove(index))
        }
        ItemPath::InFolder(folder, index) => match children.get_mut(folder) {
            Some(Item::Folder(f)) if index < f.children.len() => {
                Ok(Item::Bookmark(f.children.remove(index)))
            }
            _ => Err(DomainError::NoItemAt(path)),
        },
    }
}

/// Insert `item` at `path`, shifting the item at that index and its later
/// siblings right.
///
/// An index past the end appends. Folders are refused as folder children.
pub fn insert(children: &mut Vec<Item>, path: ItemPath, item: Item) -> Result<(), Refused> {
    match path {
        ItemPath::Root(index) => {
            let index = index.min(children.len());
            children.insert(index, item);
            Ok(())
        }
        ItemPath::InFolder(folder, index) => {
            let target = match children.get_mut(folder) {
                Some(Item::Folder(f)) => f,
                _ => {
                    return Err(Refused {
                        error: DomainError::InvalidDestination(format!(
                            "{} is not inside a folder",
                            path
                        )),
                        item,
                    })
                }
            };
            match item {
                Item::Bookmark(bookmark) => {
                    let index = index.min(target.children.len());
                    target.children.insert(index, bookmark);
                    Ok(())
                }
                Item::Folder(inner) => Err(Refused {
                    error: DomainError::InvalidDestination(format!(
                        "folder {} cannot be placed inside folder {}",
                        inner.id, target.id
                    )),
                    item: Item::Folder(inner),
                }),
            }
        }
    }
}

/// Replace the item at `path` in place, returning the previous value.
pub fn replace(children: &mut [Item], path: ItemPath, item: Item) -> DomainResult<Item> {
    match path {
        ItemPath::Root(index) => {
            let slot = children.get_mut(index).ok_or(DomainError::NoItemAt(path))?;
            Ok(std::mem::replace(slot, item))
        }
        ItemPath::InFolder(folder, index) => {
            let slot = match children.get_mut(folder) {
                Some(Item::Folder(f)) => f.children.get_mut(index),
                _ => None,
            }
            .ok_or(DomainError::NoItemAt(path))?;
            match item {
                Item::Bookmark(bookmark) => Ok(Item::Bookmark(std::mem::replace(slot, bookmark))),
                Item::Folder(f) => Err(DomainError::InvalidDestination(format!(
                    "folder {} cannot replace a folder child",
                    f.id
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bookmark, Folder, GridSize};

    fn bookmark(id: &str) -> Item {
        Item::Bookmark(Bookmark {
            id: id.into(),
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
    fn given_root_path_when_extracting_then_later_siblings_shift_left() {
        let mut children = vec![bookmark("a"), bookmark("b"), bookmark("c")];
        let removed = extract(&mut children, ItemPath::Root(1)).unwrap();
        assert_eq!(removed.id(), "b");
        assert_eq!(ids(&children), ["a", "c"]);
    }

    #[test]
    fn given_folder_path_when_extracting_then_only_that_folder_changes() {
        let mut children = vec![folder("f1", &["x", "y"]), folder("f2", &["z"])];
        let removed = extract(&mut children, ItemPath::InFolder(0, 0)).unwrap();
        assert_eq!(removed.id(), "x");
        assert_eq!(folder_ids(&children[0]), ["y"]);
        assert_eq!(folder_ids(&children[1]), ["z"]);
    }

    #[test]
    fn given_out_of_bounds_path_when_extracting_then_no_item_and_unchanged() {
        let mut children = vec![bookmark("a"), folder("f1", &[])];
        let before = children.clone();
        assert!(matches!(
            extract(&mut children, ItemPath::Root(2)),
            Err(DomainError::NoItemAt(_))
        ));
        assert!(extract(&mut children, ItemPath::InFolder(1, 0)).is_err());
        assert!(extract(&mut children, ItemPath::InFolder(0, 0)).is_err());
        assert_eq!(children, before);
    }

    #[test]
    fn given_extracted_item_when_reinserting_at_same_path_then_tree_is_restored() {
        let original = vec![bookmark("a"), folder("f1", &["x", "y", "z"]), bookmark("c")];
        for path in [ItemPath::Root(0), ItemPath::Root(2), ItemPath::InFolder(1, 1)] {
            let mut children = original.clone();
            let item = extract(&mut children, path).unwrap();
            insert(&mut children, path, item).unwrap();
            assert_eq!(children, original, "round trip through {}", path);
        }
    }

    #[test]
    fn given_folder_item_when_inserting_into_folder_then_refused_with_item_returned() {
        let mut children = vec![folder("f1", &["x"])];
        let refused = insert(&mut children, ItemPath::InFolder(0, 0), folder("f2", &[])).unwrap_err();
        assert!(matches!(refused.error, DomainError::InvalidDestination(_)));
        assert_eq!(refused.item.id(), "f2");
        assert_eq!(folder_ids(&children[0]), ["x"]);
    }

    #[test]
    fn given_index_past_end_when_inserting_then_appends() {
        let mut children = vec![bookmark("a")];
        insert(&mut children, ItemPath::Root(7), bookmark("b")).unwrap();
        assert_eq!(ids(&children), ["a", "b"]);
    }

    #[test]
    fn given_bookmark_path_when_inserting_into_folder_slot_then_refused() {
        let mut children = vec![bookmark("a")];
        let refused = insert(&mut children, ItemPath::InFolder(0, 0), bookmark("b")).unwrap_err();
        assert_eq!(refused.item.id(), "b");
    }

    #[test]
    fn given_folder_child_when_replacing_with_folder_then_invalid_destination() {
        let mut children = vec![folder("f1", &["x"])];
        let err = replace(&mut children, ItemPath::InFolder(0, 0), folder("f2", &[])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDestination(_)));
        let old = replace(&mut children, ItemPath::InFolder(0, 0), bookmark("x")).unwrap();
        assert_eq!(old.id(), "x");
    }
}
