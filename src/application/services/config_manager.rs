//! Tab config persistence
//!
//! Serializes the start-page document to JSON under one storage key. Loading a
//! key that was never written yields the default document.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::application::error_ext::{IoResultExt, JsonResultExt};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Item, StartPage, Tab};
use crate::infrastructure::traits::KeyValueStore;

/// Storage key of the tab config.
pub const DEFAULT_STORAGE_KEY: &str = "tabConfig";

/// Id of the tab in a fresh document.
pub const DEFAULT_TAB_ID: &str = "1";

/// Icon of the tab in a fresh document.
pub const DEFAULT_TAB_ICON: &str = "home";

/// Loads, saves, imports and exports the tab config.
pub struct ConfigManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default_tab_name: String,
    pretty: bool,
}

impl ConfigManager {
    /// Create a manager with the default settings.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::from_settings(store, &Settings::default())
    }

    /// Create a manager honouring the storage settings.
    pub fn from_settings(store: Arc<dyn KeyValueStore>, settings: &Settings) -> Self {
        Self {
            store,
            key: settings.storage_key.clone(),
            default_tab_name: settings.default_tab_name.clone(),
            pretty: settings.pretty,
        }
    }

    /// Document used when nothing is stored, and by reset.
    pub fn default_page(&self) -> StartPage {
        StartPage {
            base_config: default_base_config(),
            ..StartPage::with_tab(Tab::new(
                DEFAULT_TAB_ID,
                self.default_tab_name.clone(),
                DEFAULT_TAB_ICON,
            ))
        }
    }

    /// Load the stored document, or the default one if none is stored.
    pub fn load(&self) -> ApplicationResult<StartPage> {
        match self.store.get(&self.key).with_key_context("load", &self.key)? {
            Some(json) => {
                let page = self.parse(&json)?;
                debug!("load: {} tabs from '{}'", page.nav_config.len(), self.key);
                Ok(page)
            }
            None => {
                debug!("load: nothing stored under '{}', using defaults", self.key);
                Ok(self.default_page())
            }
        }
    }

    /// Persist the complete document.
    pub fn save(&self, page: &StartPage) -> ApplicationResult<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(page)
        } else {
            serde_json::to_string(page)
        }
        .with_json_context("serialize tab config")?;
        self.store
            .set(&self.key, &json)
            .with_key_context("save", &self.key)?;
        info!("save: {} bytes under '{}'", json.len(), self.key);
        Ok(())
    }

    /// Pretty-printed document for export.
    pub fn export(&self, page: &StartPage) -> ApplicationResult<String> {
        serde_json::to_string_pretty(page).with_json_context("export tab config")
    }

    /// Parse and validate a document, e.g. for import.
    pub fn parse(&self, json: &str) -> ApplicationResult<StartPage> {
        let page: StartPage = serde_json::from_str(json).with_json_context("parse tab config")?;
        validate(&page)?;
        Ok(page)
    }

    /// Default export file name for `date`: `tab-config-YYYY-MM-DD.json`.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("tab-config-{}.json", date.format("%Y-%m-%d"))
    }
}

/// Widget settings of a fresh document. The web front end reads `icon`,
/// `theme` and the other sections without checking they exist.
fn default_base_config() -> Value {
    json!({
        "icon": {
            "iconLayout": "custom",
            "iconRadius": 16,
            "iconSize": 62,
            "iconX": 34,
            "iconY": 34,
            "name": 1,
            "nameColor": "#f9d1ce",
            "nameSize": 14,
            "opactiy": 1,
            "showAddIcon": false,
            "startAnimation": true,
            "unit": "px",
            "width": 1248,
            "xysync": true
        },
        "lang": "zh-CN",
        "layout": {
            "view": "widget",
            "yiyan": true
        },
        "open": {
            "iconBlank": false,
            "searchBlank": false
        },
        "search": {
            "bgColor": 0.3,
            "blank": false,
            "height": 60,
            "history": false,
            "radius": 20,
            "show": true,
            "translate": "https://fanyi.baidu.com/#zh/en/"
        },
        "searchEngine": [
            { "href": " https://www.baidu.com/s?wd=%s&tn=15007414_23_dg&ie=utf-8", "key": "baidu", "title": "百度" },
            { "href": " https://www.google.com/search?q=", "key": "google", "title": "Google" },
            { "href": " https://www.bing.com/search?form=QBLH&q=", "key": "bing", "title": "必应" },
            { "href": " https://github.com/search?q=", "key": "github", "title": "gitHub" }
        ],
        "sidebar": {
            "autoHide": false,
            "lastGroup": false,
            "mouseGroup": true,
            "opacity": 0.1,
            "placement": "left",
            "width": 53
        },
        "theme": {
            "color": "#1890ff",
            "mode": "light",
            "system": false
        },
        "time": {
            "color": "#fff",
            "font": "HarmonyOS_Sans",
            "fontWeight": "600",
            "hour24": true,
            "lunar": "inline",
            "month": "inline",
            "sec": true,
            "show": true,
            "size": 81,
            "week": "inline"
        },
        "topSearch": [
            { "id": "KqndgxeLl9", "name": "微博" }
        ],
        "useSearch": "github",
        "useSearchPre": ["baidu", "google", "bing", "github"],
        "wallpaper": {
            "blur": 0,
            "mask": 0.26,
            "name": "627908c13781bf424fb85749",
            "source": "",
            "src": " https://files.codelife.cc//itab/wallpaper/627908c13781bf424fb85749.jpeg?x-oss-process=image/resize,limit_0,m_fill,w_3840,h_2160/quality,q_96/format,webp&t=1733842885932",
            "thumb": " https://files.codelife.cc//itab/wallpaper/627908c13781bf424fb85749.jpeg?x-oss-process=image/resize,limit_0,m_fill,w_300,h_180/quality,q_92/format,webp&t=1733842885932",
            "time": 0,
            "type": 4
        }
    })
}

/// Structural checks serde cannot express: at least one tab, unique tab ids,
/// unique item ids across the whole forest.
pub fn validate(page: &StartPage) -> ApplicationResult<()> {
    if page.nav_config.is_empty() {
        return Err(ApplicationError::InvalidDocument("no tabs".into()));
    }

    let mut tab_ids = HashSet::new();
    let mut item_ids = HashSet::new();
    for tab in &page.nav_config {
        if !tab_ids.insert(tab.id.as_str()) {
            return Err(ApplicationError::InvalidDocument(format!(
                "duplicate tab id {}",
                tab.id
            )));
        }
        for item in &tab.children {
            let nested: Vec<&str> = match item {
                Item::Folder(f) => f.children.iter().map(|b| b.id.as_str()).collect(),
                Item::Bookmark(_) => Vec::new(),
            };
            for id in std::iter::once(item.id()).chain(nested) {
                if !item_ids.insert(id) {
                    return Err(ApplicationError::InvalidDocument(format!(
                        "duplicate item id {}",
                        id
                    )));
                }
            }
        }
    }
    Ok(())
}
