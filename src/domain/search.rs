//! Stateless search over a tab's top-level items.

use crate::domain::{Bookmark, Item};

/// Items of `items` matching `query`, in their original order.
///
/// Case-insensitive substring match. Bookmarks match on title or url; folders
/// match on their name or on any child bookmark. An empty query matches all.
pub fn filter<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items.iter().filter(|item| matches(item, &needle)).collect()
}

fn matches(item: &Item, needle: &str) -> bool {
    match item {
        Item::Bookmark(b) => bookmark_matches(b, needle),
        Item::Folder(f) => {
            contains(&f.name, needle) || f.children.iter().any(|b| bookmark_matches(b, needle))
        }
    }
}

fn bookmark_matches(bookmark: &Bookmark, needle: &str) -> bool {
    contains(&bookmark.title, needle) || contains(&bookmark.url, needle)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Folder, GridSize};

    fn bookmark(id: &str, title: &str, url: &str) -> Bookmark {
        Bookmark {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    fn ids<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn given_query_when_filtering_then_matches_title_or_url_case_insensitively() {
        let items = vec![
            Item::Bookmark(bookmark("1", "GitHub", "https://github.com")),
            Item::Bookmark(bookmark("2", "Docs", "git.example.com")),
            Item::Bookmark(bookmark("3", "News", "https://news.example.com")),
        ];
        assert_eq!(ids(&filter(&items, "git")), ["1", "2"]);
        assert_eq!(ids(&filter(&items, "NEWS")), ["3"]);
    }

    #[test]
    fn given_folder_when_child_matches_then_folder_is_kept() {
        let mut folder = Folder::new("f", "Work", GridSize::default());
        folder.children.push(bookmark("c", "Jenkins", "https://ci.local"));
        let items = vec![Item::Folder(folder), Item::Bookmark(bookmark("b", "Mail", ""))];

        assert_eq!(ids(&filter(&items, "jenk")), ["f"]);
        assert_eq!(ids(&filter(&items, "wor")), ["f"]);
        assert!(filter(&items, "zzz").is_empty());
    }

    #[test]
    fn given_empty_query_when_filtering_then_everything_is_returned() {
        let items = vec![
            Item::Bookmark(bookmark("1", "", "")),
            Item::Folder(Folder::new("f", "", GridSize::default())),
        ];
        assert_eq!(ids(&filter(&items, "")), ["1", "f"]);
    }
}
