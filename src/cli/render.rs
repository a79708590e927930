//! Tree rendering of tabs and their items

use termtree::Tree;

use crate::domain::{Bookmark, Folder, Item, Tab};

pub trait ToTree {
    fn to_tree(&self) -> Tree<String>;
}

impl ToTree for Bookmark {
    fn to_tree(&self) -> Tree<String> {
        let label = if self.url.is_empty() {
            format!("{} [{}]", self.title, self.id)
        } else {
            format!("{} <{}> [{}]", self.title, self.url, self.id)
        };
        Tree::new(label)
    }
}

impl ToTree for Folder {
    fn to_tree(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(ToTree::to_tree).collect();
        Tree::new(format!("{}/ ({}) [{}]", self.name, self.size, self.id)).with_leaves(leaves)
    }
}

impl ToTree for Item {
    fn to_tree(&self) -> Tree<String> {
        match self {
            Item::Bookmark(b) => b.to_tree(),
            Item::Folder(f) => f.to_tree(),
        }
    }
}

impl ToTree for Tab {
    fn to_tree(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(ToTree::to_tree).collect();
        Tree::new(format!("{} [{}]", self.name, self.id)).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridSize;

    #[test]
    fn given_tab_with_folder_when_rendering_then_nests_folder_children() {
        let mut folder = Folder::new("f1", "Work", GridSize { rows: 2, cols: 2 });
        folder.children.push(Bookmark {
            id: "b2".into(),
            title: "Mail".into(),
            url: "https://mail.example".into(),
            ..Default::default()
        });
        let mut tab = Tab::new("1", "Home", "home");
        tab.children.push(Item::Folder(folder));

        let rendered = tab.to_tree().to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Home [1]");
        assert!(lines[1].contains("Work/ (2x2) [f1]"));
        assert!(lines[2].contains("Mail <https://mail.example> [b2]"));
        // folder children are indented below the folder
        assert!(lines[2].find("Mail") > lines[1].find("Work"));
    }
}
