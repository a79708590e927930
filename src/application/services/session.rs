//! Session store: owns the live start-page tree and runs UI commands on it
//!
//! Every mutating command works on a private copy of the current snapshot. A
//! command either replaces the snapshot with the copy and saves it once, or
//! drops the copy and reports why nothing changed. Snapshots already handed out
//! are never touched.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::services::ConfigManager;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::mutation::{extract, replace};
use crate::domain::search;
use crate::domain::tree::{find_path, folder_index, occurrences};
use crate::domain::{
    apply_drag_end, BookmarkDraft, ContainerId, DomainError, DragEnd, DropLocation, Folder,
    GridSize, Item, ItemPath, Skip, StartPage, Tab,
};
use crate::infrastructure::traits::IdSource;

/// Effect of a command on the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged(Skip),
}

/// Result of one command: the snapshot to render from, what happened, and a
/// non-fatal persistence failure if saving did not work.
#[derive(Debug)]
pub struct CommandReport {
    pub snapshot: Arc<StartPage>,
    pub outcome: Outcome,
    pub save_error: Option<ApplicationError>,
}

impl CommandReport {
    pub fn applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }

    pub fn skip(&self) -> Option<&Skip> {
        match &self.outcome {
            Outcome::Unchanged(skip) => Some(skip),
            Outcome::Applied => None,
        }
    }
}

/// Session-scoped owner of the tree plus view state (active tab, open folder).
pub struct Session {
    config: ConfigManager,
    ids: Arc<dyn IdSource>,
    page: Arc<StartPage>,
    active_tab: String,
    current_folder: Option<String>,
    unsaved: bool,
}

impl Session {
    /// Load the stored tree and activate `preferred_tab` if it exists,
    /// otherwise the first tab.
    pub fn open(
        config: ConfigManager,
        ids: Arc<dyn IdSource>,
        preferred_tab: Option<&str>,
    ) -> ApplicationResult<Self> {
        let page = config.load()?;
        let active_tab = pick_tab(&page, preferred_tab);
        if let Some(wanted) = preferred_tab {
            if wanted != active_tab {
                warn!("tab {} does not exist, showing {}", wanted, active_tab);
            }
        }
        Ok(Self {
            config,
            ids,
            page: Arc::new(page),
            active_tab,
            current_folder: None,
            unsaved: false,
        })
    }

    // ---------------------------------------------------------------
    // queries
    // ---------------------------------------------------------------

    /// Current snapshot; stays valid after later commands.
    pub fn snapshot(&self) -> Arc<StartPage> {
        Arc::clone(&self.page)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.page.nav_config
    }

    pub fn active_tab_id(&self) -> &str {
        &self.active_tab
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.page.tab(&self.active_tab)
    }

    /// Top-level items of the active tab.
    pub fn items(&self) -> &[Item] {
        self.active_tab()
            .map(|t| t.children.as_slice())
            .unwrap_or(&[])
    }

    /// Folder currently open in the view, if any.
    pub fn current_folder(&self) -> Option<&Folder> {
        let id = self.current_folder.as_deref()?;
        self.items()
            .iter()
            .filter_map(Item::as_folder)
            .find(|f| f.id == id)
    }

    /// True when the latest state has not reached the store yet.
    pub fn is_dirty(&self) -> bool {
        self.unsaved
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    /// Top-level items of the active tab matching `query`.
    pub fn filter(&self, query: &str) -> Vec<&Item> {
        search::filter(self.items(), query)
    }

    /// Drag-end event that moves `item_id` from wherever it is now to
    /// `destination`.
    pub fn drag_end_for(&self, item_id: &str, destination: DropLocation) -> Option<DragEnd> {
        let items = self.items();
        let (container, index) = find_path(items, item_id)?.location(items)?;
        Some(DragEnd {
            dragged_item_id: item_id.to_string(),
            source: DropLocation::new(container.to_string(), index),
            destination: Some(destination),
        })
    }

    // ---------------------------------------------------------------
    // view state (not persisted)
    // ---------------------------------------------------------------

    pub fn select_tab(&mut self, tab_id: &str) -> Result<(), Skip> {
        if self.page.tab(tab_id).is_none() {
            return Err(DomainError::TabNotFound(tab_id.to_string()).into());
        }
        self.active_tab = tab_id.to_string();
        self.current_folder = None;
        Ok(())
    }

    pub fn open_folder(&mut self, folder_id: &str) -> Result<(), Skip> {
        if folder_index(self.items(), folder_id).is_none() {
            return Err(DomainError::ItemNotFound(folder_id.to_string()).into());
        }
        self.current_folder = Some(folder_id.to_string());
        Ok(())
    }

    pub fn close_folder(&mut self) {
        self.current_folder = None;
    }

    // ---------------------------------------------------------------
    // commands
    // ---------------------------------------------------------------

    /// Append a new bookmark to `target`; without a target it goes into the
    /// open folder, or the tab root when no folder is open.
    #[instrument(level = "debug", skip(self))]
    pub fn add_item(&mut self, target: Option<ContainerId>, draft: BookmarkDraft) -> CommandReport {
        let target = target
            .or_else(|| self.current_folder.clone().map(ContainerId::Folder))
            .unwrap_or(ContainerId::Root);
        let bookmark = draft.into_bookmark(self.fresh_id());

        self.edit_tab("add-item", move |children| {
            match target {
                ContainerId::Root => children.push(Item::Bookmark(bookmark)),
                ContainerId::Folder(folder_id) => match children
                    .iter_mut()
                    .find(|item| item.id() == folder_id.as_str())
                {
                    Some(Item::Folder(folder)) => folder.children.push(bookmark),
                    _ => return Err(DomainError::ItemNotFound(folder_id).into()),
                },
            }
            Ok(())
        })
    }

    /// Delete any item by id. Deleting a folder deletes its children.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_item(&mut self, item_id: &str) -> CommandReport {
        self.edit_tab("delete-item", |children| {
            let path = find_path(children, item_id)
                .ok_or_else(|| DomainError::ItemNotFound(item_id.to_string()))?;
            extract(children, path)?;
            Ok(())
        })
    }

    /// Replace the item carrying `item.id()` wherever it lives in the active tab.
    #[instrument(level = "debug", skip(self))]
    pub fn update_item(&mut self, item: Item) -> CommandReport {
        let item_id = item.id().to_string();
        self.edit_tab("update-item", move |children| {
            let path = find_path(children, &item_id)
                .ok_or_else(|| DomainError::ItemNotFound(item_id.clone()))?;
            replace(children, path, item)?;
            Ok(())
        })
    }

    /// Append an empty folder to the tab root.
    #[instrument(level = "debug", skip(self))]
    pub fn create_folder(&mut self, name: &str, size: GridSize) -> CommandReport {
        let folder = Folder::new(self.fresh_id(), name.trim(), size);
        self.edit_tab("create-folder", move |children| {
            children.push(Item::Folder(folder));
            Ok(())
        })
    }

    /// Delete a folder and everything in it.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_folder(&mut self, folder_id: &str) -> CommandReport {
        self.edit_tab("delete-folder", |children| {
            let index = folder_index(children, folder_id)
                .ok_or_else(|| DomainError::ItemNotFound(folder_id.to_string()))?;
            extract(children, ItemPath::Root(index))?;
            Ok(())
        })
    }

    /// Apply one completed drag gesture.
    #[instrument(level = "debug", skip(self))]
    pub fn move_item(&mut self, event: &DragEnd) -> CommandReport {
        self.edit_tab("move", |children| {
            let moved = apply_drag_end(children, event)?;
            debug!("move: {} {} -> {}", event.dragged_item_id, moved.from, moved.to);
            Ok(())
        })
    }

    /// Append a new empty tab.
    #[instrument(level = "debug", skip(self))]
    pub fn add_tab(&mut self, name: &str, icon: &str) -> CommandReport {
        let name = name.trim();
        if name.is_empty() {
            return self.unchanged("add-tab", Skip::Refused("tab name is empty".into()));
        }
        let mut next = StartPage::clone(&self.page);
        next.nav_config.push(Tab::new(self.fresh_id(), name, icon));
        self.commit("add-tab", next)
    }

    /// Delete a tab with all its items. The last tab cannot be deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_tab(&mut self, tab_id: &str) -> CommandReport {
        let Some(index) = self.page.nav_config.iter().position(|t| t.id == tab_id) else {
            return self.unchanged("delete-tab", DomainError::TabNotFound(tab_id.into()).into());
        };
        if self.page.nav_config.len() == 1 {
            return self.unchanged("delete-tab", DomainError::LastTab(tab_id.into()).into());
        }
        let mut next = StartPage::clone(&self.page);
        next.nav_config.remove(index);
        self.commit("delete-tab", next)
    }

    /// Replace the whole document with an imported one.
    ///
    /// Malformed input is an error and leaves the session untouched.
    #[instrument(level = "debug", skip(self, json))]
    pub fn import(&mut self, json: &str) -> ApplicationResult<CommandReport> {
        let next = self.config.parse(json)?;
        Ok(self.commit("import", next))
    }

    /// Replace the whole document with the default one.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> CommandReport {
        let next = self.config.default_page();
        self.commit("reset", next)
    }

    /// Pretty JSON of the current snapshot.
    pub fn export(&self) -> ApplicationResult<String> {
        self.config.export(&self.page)
    }

    /// Retry a save that failed earlier. No-op when nothing is pending.
    pub fn flush(&mut self) -> ApplicationResult<()> {
        if self.unsaved {
            self.config.save(&self.page)?;
            self.unsaved = false;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // internals
    // ---------------------------------------------------------------

    /// Run `edit` on a copy of the active tab's children and commit it on success.
    fn edit_tab<F>(&mut self, command: &'static str, edit: F) -> CommandReport
    where
        F: FnOnce(&mut Vec<Item>) -> Result<(), Skip>,
    {
        let mut next = StartPage::clone(&self.page);
        let result = match next.tab_mut(&self.active_tab) {
            Some(tab) => edit(&mut tab.children),
            None => Err(DomainError::TabNotFound(self.active_tab.clone()).into()),
        };
        match result {
            Ok(()) => self.commit(command, next),
            Err(skip) => self.unchanged(command, skip),
        }
    }

    /// Install `next` and save it. The only place that writes to the store.
    fn commit(&mut self, command: &str, next: StartPage) -> CommandReport {
        self.page = Arc::new(next);
        self.reconcile_view();
        info!("{}: committed (tab {})", command, self.active_tab);

        let save_error = match self.config.save(&self.page) {
            Ok(()) => {
                self.unsaved = false;
                None
            }
            Err(e) => {
                warn!("{}: {}; changes are kept in memory", command, e);
                self.unsaved = true;
                Some(e)
            }
        };

        CommandReport {
            snapshot: self.snapshot(),
            outcome: Outcome::Applied,
            save_error,
        }
    }

    /// Next id from the id source that no tab or item uses yet.
    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.next_id();
            if !self.id_in_use(&id) {
                return id;
            }
            debug!("fresh_id: {} already in use", id);
        }
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.page
            .nav_config
            .iter()
            .any(|tab| tab.id == id || occurrences(&tab.children, id) > 0)
    }

    fn unchanged(&self, command: &str, skip: Skip) -> CommandReport {
        debug!("{}: unchanged: {:?}", command, skip);
        CommandReport {
            snapshot: self.snapshot(),
            outcome: Outcome::Unchanged(skip),
            save_error: None,
        }
    }

    /// Fall back to the first tab / the root view when what was shown is gone.
    fn reconcile_view(&mut self) {
        if self.page.tab(&self.active_tab).is_none() {
            self.active_tab = pick_tab(&self.page, None);
            self.current_folder = None;
        }
        if self.current_folder.is_some() && self.current_folder().is_none() {
            debug!("open folder no longer exists, back to root view");
            self.current_folder = None;
        }
    }
}

fn pick_tab(page: &StartPage, preferred: Option<&str>) -> String {
    preferred
        .filter(|id| page.tab(id).is_some())
        .or_else(|| page.first_tab_id())
        .unwrap_or_default()
        .to_string()
}
