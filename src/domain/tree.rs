//! Read-only queries over a tab's children.

use crate::domain::{Item, ItemPath};

/// Depth-first search for `id` in `children` and their folder contents.
///
/// `None` is a normal outcome (the item was deleted while a gesture was in
/// flight) and callers treat it as a no-op signal.
pub fn find_path(children: &[Item], id: &str) -> Option<ItemPath> {
    for (index, item) in children.iter().enumerate() {
        if item.id() == id {
            return Some(ItemPath::Root(index));
        }
        if let Item::Folder(folder) = item {
            if let Some(child) = folder.children.iter().position(|b| b.id == id) {
                return Some(ItemPath::InFolder(index, child));
            }
        }
    }
    None
}

pub fn is_folder(item: &Item) -> bool {
    item.is_folder()
}

/// Root index of the folder with `folder_id`.
pub fn folder_index(children: &[Item], folder_id: &str) -> Option<usize> {
    children
        .iter()
        .position(|item| matches!(item, Item::Folder(f) if f.id == folder_id))
}

/// Id of the item addressed by `path`, if the path is in bounds.
pub fn id_at<'a>(children: &'a [Item], path: ItemPath) -> Option<&'a str> {
    match path {
        ItemPath::Root(index) => children.get(index).map(Item::id),
        ItemPath::InFolder(folder, index) => children
            .get(folder)?
            .as_folder()?
            .children
            .get(index)
            .map(|b| b.id.as_str()),
    }
}

/// Copy of the item with `id`, wherever it lives.
pub fn find_item(children: &[Item], id: &str) -> Option<Item> {
    match find_path(children, id)? {
        ItemPath::Root(index) => children.get(index).cloned(),
        ItemPath::InFolder(folder, index) => children
            .get(folder)?
            .as_folder()?
            .children
            .get(index)
            .cloned()
            .map(Item::Bookmark),
    }
}

/// Total number of items: root items plus every folder child.
pub fn count_items(children: &[Item]) -> usize {
    children
        .iter()
        .map(|item| match item {
            Item::Bookmark(_) => 1,
            Item::Folder(f) => 1 + f.children.len(),
        })
        .sum()
}

/// How often `id` occurs anywhere below the tab.
pub fn occurrences(children: &[Item], id: &str) -> usize {
    children
        .iter()
        .map(|item| {
            let own = usize::from(item.id() == id);
            let nested = item
                .as_folder()
                .map_or(0, |f| f.children.iter().filter(|b| b.id == id).count());
            own + nested
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bookmark, Folder, GridSize};

    fn bookmark(id: &str) -> Bookmark {
        Bookmark {
            id: id.into(),
            title: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Item> {
        let mut folder = Folder::new("f1", "Work", GridSize::default());
        folder.children = vec![bookmark("b2"), bookmark("b3")];
        vec![Item::Bookmark(bookmark("b1")), Item::Folder(folder)]
    }

    #[test]
    fn given_root_item_when_finding_path_then_returns_root_index() {
        assert_eq!(find_path(&sample(), "b1"), Some(ItemPath::Root(0)));
        assert_eq!(find_path(&sample(), "f1"), Some(ItemPath::Root(1)));
    }

    #[test]
    fn given_folder_child_when_finding_path_then_returns_folder_path() {
        assert_eq!(find_path(&sample(), "b3"), Some(ItemPath::InFolder(1, 1)));
    }

    #[test]
    fn given_unknown_id_when_finding_path_then_none() {
        assert_eq!(find_path(&sample(), "nope"), None);
        assert_eq!(find_path(&[], "b1"), None);
    }

    #[test]
    fn given_paths_when_reading_ids_then_out_of_bounds_is_none() {
        let children = sample();
        assert_eq!(id_at(&children, ItemPath::InFolder(1, 0)), Some("b2"));
        assert_eq!(id_at(&children, ItemPath::InFolder(0, 0)), None);
        assert_eq!(id_at(&children, ItemPath::Root(9)), None);
    }

    #[test]
    fn given_tree_when_counting_then_includes_folder_children() {
        let children = sample();
        assert_eq!(count_items(&children), 4);
        assert_eq!(occurrences(&children, "b2"), 1);
        assert!(is_folder(&children[1]));
    }

    #[test]
    fn given_folder_child_id_when_finding_item_then_returns_bookmark_copy() {
        let children = sample();
        let item = find_item(&children, "b3").expect("found");
        assert_eq!(item.label(), "B3");
        assert!(!item.is_folder());
        assert!(find_item(&children, "f1").is_some_and(|i| i.is_folder()));
        assert!(find_item(&children, "nope").is_none());
    }
}
