//! Domain entities: the start-page document, its tabs and their items

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// The complete persisted start-page document.
///
/// Only `nav_config` is interpreted here. `base_config`, `notes` and `todo`
/// belong to widgets outside this crate and are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartPage {
    #[serde(default = "empty_object")]
    pub base_config: Value,
    #[serde(default)]
    pub nav_config: Vec<Tab>,
    #[serde(default)]
    pub notes: Vec<Value>,
    #[serde(default)]
    pub todo: Vec<Value>,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl StartPage {
    /// Fresh document with a single empty tab.
    pub fn with_tab(tab: Tab) -> Self {
        Self {
            base_config: empty_object(),
            nav_config: vec![tab],
            notes: Vec::new(),
            todo: Vec::new(),
        }
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.nav_config.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: &str) -> Option<&mut Tab> {
        self.nav_config.iter_mut().find(|t| t.id == id)
    }

    pub fn first_tab_id(&self) -> Option<&str> {
        self.nav_config.first().map(|t| t.id.as_str())
    }
}

/// Top-level named container, one page of the start screen.
///
/// Tabs, bookmarks and folders keep fields they do not know in `extra`, so a
/// document written by another front end survives a load and save unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub children: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tab {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            children: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Entry directly below a tab.
///
/// Serialized internally tagged by `"type"`: bookmarks use the historical
/// tag `"icon"`, folders `"folder"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Item {
    #[serde(rename = "icon")]
    Bookmark(Bookmark),
    #[serde(rename = "folder")]
    Folder(Folder),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::Bookmark(b) => &b.id,
            Item::Folder(f) => &f.id,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Item::Folder(_))
    }

    /// Title for bookmarks, name for folders.
    pub fn label(&self) -> &str {
        match self {
            Item::Bookmark(b) => &b.title,
            Item::Folder(f) => &f.name,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Item::Folder(f) => Some(f),
            Item::Bookmark(_) => None,
        }
    }
}

impl From<Bookmark> for Item {
    fn from(bookmark: Bookmark) -> Self {
        Item::Bookmark(bookmark)
    }
}

impl From<Folder> for Item {
    fn from(folder: Folder) -> Self {
        Item::Folder(folder)
    }
}

/// Leaf link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Icon reference (favicon URL or data URI)
    #[serde(default, rename = "src")]
    pub icon: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named group of bookmarks. Folders never contain folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: GridSize,
    #[serde(
        default,
        serialize_with = "serialize_children",
        deserialize_with = "deserialize_children"
    )]
    pub children: Vec<Bookmark>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: GridSize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            children: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Folder children keep the `"type": "icon"` tag on disk so documents written
/// by other front ends stay readable in both directions.
fn serialize_children<S>(children: &[Bookmark], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[derive(Serialize)]
    struct Tagged<'a> {
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(flatten)]
        bookmark: &'a Bookmark,
    }

    serializer.collect_seq(children.iter().map(|bookmark| Tagged {
        kind: "icon",
        bookmark,
    }))
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<Bookmark>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default();
    items
        .into_iter()
        .map(|item| match item {
            Item::Bookmark(b) => Ok(b),
            Item::Folder(f) => Err(de::Error::custom(format!(
                "folder '{}' is nested inside another folder",
                f.id
            ))),
        })
        .collect()
}

/// Grid footprint of a folder tile, written as `"<rows>x<cols>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridSize {
    pub rows: u8,
    pub cols: u8,
}

impl Default for GridSize {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridSize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidGridSize(s.to_string());
        let (rows, cols) = s.trim().split_once('x').ok_or_else(invalid)?;
        let rows: u8 = rows.trim().parse().map_err(|_| invalid())?;
        let cols: u8 = cols.trim().parse().map_err(|_| invalid())?;
        if rows == 0 || cols == 0 {
            return Err(invalid());
        }
        Ok(Self { rows, cols })
    }
}

impl TryFrom<String> for GridSize {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridSize> for String {
    fn from(size: GridSize) -> Self {
        size.to_string()
    }
}

/// User-supplied fields for a new bookmark; the id is minted on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub icon: String,
    pub background_color: String,
}

impl BookmarkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            url: url.into().trim().to_string(),
            ..Default::default()
        }
    }

    pub fn into_bookmark(self, id: String) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            icon: self.icon,
            background_color: self.background_color,
            extra: Map::new(),
        }
    }
}
