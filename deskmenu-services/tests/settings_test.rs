use deskmenu_core::config::MenuConfig;
use deskmenu_services::{Settings, SettingsError, SettingsRegistry};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn temp_settings(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deskmenu-settings-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_later_files_override_earlier() {
    let system = temp_settings(
        "system.toml",
        "[menu]\nedge_margin_x = 8.0\nsubmenu_indicator = \"»\"\n",
    );
    let user = temp_settings("user.toml", "[menu]\nedge_margin_x = 2.0\n");

    let mut registry = SettingsRegistry::default();
    let results = registry.load_from_paths_async(vec![system, user]).await;

    assert!(results.iter().all(|r| r.is_ok()));
    let style = &registry.menu_config().style;
    assert_eq!(style.edge_margin_x, 2.0);
    assert_eq!(style.submenu_indicator, "»");
    assert_eq!(style.edge_margin_y, MenuConfig::default().style.edge_margin_y);
}

#[tokio::test]
async fn test_missing_file_is_reported_and_skipped() {
    let good = temp_settings("good.toml", "[menu]\nreconcile_interval_ms = 30\n");
    let missing = std::env::temp_dir().join("deskmenu-settings-does-not-exist.toml");

    let mut registry = SettingsRegistry::default();
    let results = registry.load_from_paths_async(vec![missing, good]).await;

    assert!(results[0].is_err());
    assert!(results[1].is_ok());
    assert_eq!(registry.menu_config().reconcile_interval, Duration::from_millis(30));
}

#[tokio::test]
async fn test_malformed_file_keeps_defaults() {
    let broken = temp_settings("broken.toml", "[menu\nlabel_padding = ");

    let mut registry = SettingsRegistry::default();
    let results = registry.load_from_paths_async(vec![broken]).await;

    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert!(matches!(err.downcast_ref::<SettingsError>(), Some(SettingsError::Parse(_))));
    assert_eq!(registry.menu_config(), &MenuConfig::default());
}

#[tokio::test]
async fn test_general_section() {
    let path = temp_settings("general.toml", "[general]\ndebug = true\nlog_level = \"trace\"\n");

    let mut registry = SettingsRegistry::default();
    registry.load_from_paths_async(vec![path]).await;

    assert!(registry.debug());
    assert_eq!(registry.log_level(), Some("trace"));
}

#[test]
fn test_empty_settings_parse() {
    let settings = Settings::from_toml("").unwrap();
    assert!(settings.menu.label_padding.is_none());
    assert!(settings.other.is_empty());
}
