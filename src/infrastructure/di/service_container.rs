//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{ConfigManager, Session};
use crate::config::Settings;
use crate::infrastructure::storage::FileKeyValueStore;
use crate::infrastructure::traits::{
    FileSystem, IdSource, KeyValueStore, MonotonicClockIds, RealFileSystem,
};
use crate::infrastructure::InfraResult;

/// Container holding the application's I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Document store
    pub store: Arc<dyn KeyValueStore>,

    /// Item and tab id source
    pub ids: Arc<dyn IdSource>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(FileKeyValueStore::new(
            Arc::clone(&fs),
            settings.data_dir.clone(),
        ));
        Self::with_deps(settings, fs, store, Arc::new(MonotonicClockIds::default()))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            store,
            ids,
        }
    }

    pub fn config_manager(&self) -> ConfigManager {
        ConfigManager::from_settings(Arc::clone(&self.store), &self.settings)
    }

    /// Open a session on the stored document.
    ///
    /// `tab` overrides the configured active tab.
    pub fn open_session(&self, tab: Option<&str>) -> InfraResult<Session> {
        let tab = tab.or(self.settings.active_tab.as_deref());
        debug!("open_session: key={}, tab={:?}", self.settings.storage_key, tab);
        let session = Session::open(self.config_manager(), Arc::clone(&self.ids), tab)?;
        Ok(session)
    }
}
