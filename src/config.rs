//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/startpage/startpage.toml`
//! 3. Local config: `<data_dir>/.startpage.toml`
//! 4. Environment variables: `STARTPAGE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_STORAGE_KEY;
use crate::application::ApplicationError;

/// Unified configuration for startpage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the stored documents (default: ~/.startpage)
    pub data_dir: PathBuf,
    /// Storage key of the tab config (default: tabConfig)
    pub storage_key: String,
    /// Name of the tab in a fresh document
    pub default_tab_name: String,
    /// Tab shown when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<String>,
    /// Write indented JSON
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: dirs_default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_tab_name: "Home".to_string(),
            active_tab: None,
            pretty: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub default_tab_name: Option<String>,
    pub active_tab: Option<String>,
    pub pretty: Option<bool>,
}

/// Get the default data directory (~/.startpage).
fn dirs_default_data_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".startpage"))
        .unwrap_or_else(|| PathBuf::from("~/.startpage"))
}

/// Get the XDG config directory for startpage.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "startpage").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("startpage.toml"))
}

/// Get the path to the local config file in a data directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".startpage.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in `data_dir`.
    ///
    /// Unknown variables leave the path as written.
    fn expand_paths(&mut self) {
        let raw = self.data_dir.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.data_dir = PathBuf::from(expanded.as_ref());
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            storage_key: overlay
                .storage_key
                .clone()
                .unwrap_or_else(|| self.storage_key.clone()),
            default_tab_name: overlay
                .default_tab_name
                .clone()
                .unwrap_or_else(|| self.default_tab_name.clone()),
            active_tab: overlay.active_tab.clone().or_else(|| self.active_tab.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.startpage.toml`; also
    ///   becomes the data directory
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            current.data_dir = dir.to_path_buf();
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply STARTPAGE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("STARTPAGE").try_parsing(true))
            .build()
            .map_err(config_err)?;
        Ok(settings.merge_with(&Self::raw_from_env(&config)))
    }

    fn raw_from_env(config: &Config) -> RawSettings {
        RawSettings {
            data_dir: config.get_string("data_dir").ok().map(PathBuf::from),
            storage_key: config.get_string("storage_key").ok(),
            default_tab_name: config.get_string("default_tab_name").ok(),
            active_tab: config.get_string("active_tab").ok(),
            pretty: config.get_bool("pretty").ok(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# startpage configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/startpage/startpage.toml
#   Local:  <data_dir>/.startpage.toml  (read when --dir is given)
#   Env:    STARTPAGE_* environment variables

# Directory holding the stored tab config
# data_dir = "~/.startpage"

# Storage key; the document is stored as <data_dir>/<storage_key>.json
# storage_key = "tabConfig"

# Name of the single tab in a fresh or reset document
# default_tab_name = "Home"

# Tab to show when -t/--tab is not given (default: first tab)
# active_tab = "1"

# Write indented JSON
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
