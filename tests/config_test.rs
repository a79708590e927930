//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use startpage::config::{local_config_path, Settings};

#[test]
fn given_dir_without_local_config_when_load_then_dir_is_data_dir() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.data_dir, dir.path());
    assert_eq!(settings.storage_key, "tabConfig");
    assert!(settings.pretty);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
storage_key = "work"
default_tab_name = "Start"
active_tab = "2"
pretty = false
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.storage_key, "work");
    assert_eq!(settings.default_tab_name, "Start");
    assert_eq!(settings.active_tab.as_deref(), Some("2"));
    assert!(!settings.pretty);
    assert_eq!(settings.data_dir, dir.path());
}

#[test]
fn given_local_config_with_data_dir_when_load_then_expands_home() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "data_dir = \"~/bookmarks\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(
        settings.data_dir,
        std::path::Path::new(&home).join("bookmarks")
    );
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "pretty = [unclosed").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains("config error"), "got: {}", err);
}
